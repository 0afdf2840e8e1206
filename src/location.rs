use serde::*;
use std::fmt;

/// A grid coordinate packed into a `u16` (x in the high byte, y in the low
/// byte). Supports maps up to 256x256; the harness wire format represents the
/// same value as an `{ "x": .., "y": .. }` object.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Location {
    packed: u16,
}

impl Location {
    pub fn from_coords(x: u32, y: u32) -> Self {
        Location {
            packed: ((x << 8) | y) as u16,
        }
    }

    #[inline]
    pub fn x(self) -> u8 {
        ((self.packed >> 8) & 0xFF) as u8
    }

    #[inline]
    pub fn y(self) -> u8 {
        (self.packed & 0xFF) as u8
    }

    #[inline]
    pub fn packed_repr(self) -> u16 {
        self.packed
    }

    #[inline]
    pub fn from_packed(packed: u16) -> Self {
        Location { packed }
    }

    /// Manhattan distance (the movement metric on a 4-directional grid).
    pub fn distance_to(self, other: Self) -> u32 {
        let dx = (self.x() as i16) - (other.x() as i16);
        let dy = (self.y() as i16) - (other.y() as i16);

        (dx.abs() + dy.abs()) as u32
    }

    /// Offset by (dx, dy), returning `None` when the result leaves the
    /// 0..=255 coordinate range. Map-level bounds are the grid index's job.
    pub fn step(self, dx: i8, dy: i8) -> Option<Self> {
        let nx = self.x() as i16 + dx as i16;
        let ny = self.y() as i16 + dy as i16;
        if (0..=255).contains(&nx) && (0..=255).contains(&ny) {
            Some(Location::from_coords(nx as u32, ny as u32))
        } else {
            None
        }
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename = "Location")]
struct WireLocation {
    x: u16,
    y: u16,
}

impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        WireLocation {
            x: self.x() as u16,
            y: self.y() as u16,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = WireLocation::deserialize(deserializer)?;
        if wire.x > 255 || wire.y > 255 {
            return Err(de::Error::custom("coordinate out of supported range"));
        }
        Ok(Location::from_coords(wire.x as u32, wire.y as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_manhattan() {
        let a = Location::from_coords(2, 3);
        let b = Location::from_coords(5, 1);
        assert_eq!(a.distance_to(b), 5);
        assert_eq!(b.distance_to(a), 5);
        assert_eq!(a.distance_to(a), 0);
    }

    #[test]
    fn step_stays_in_coordinate_range() {
        let origin = Location::from_coords(0, 0);
        assert_eq!(origin.step(-1, 0), None);
        assert_eq!(origin.step(0, -1), None);
        assert_eq!(origin.step(1, 0), Some(Location::from_coords(1, 0)));

        let corner = Location::from_coords(255, 255);
        assert_eq!(corner.step(1, 0), None);
        assert_eq!(corner.step(0, 1), None);
    }

    #[test]
    fn wire_format_is_an_xy_object() {
        let loc = Location::from_coords(7, 12);
        let json = serde_json::to_string(&loc).unwrap();
        assert_eq!(json, r#"{"x":7,"y":12}"#);

        let back: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(back, loc);
    }
}
