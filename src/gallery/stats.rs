use serde::ser::{Serialize, SerializeMap, Serializer};

use super::ImageRecord;

/// Image count per month label, in the order labels were first seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthStats {
    entries: Vec<(String, usize)>,
}

impl MonthStats {
    /// Count the images of an already sorted listing
    pub fn from_images(images: &[ImageRecord]) -> Self {
        let mut stats = Self::default();
        for image in images {
            stats.record(&image.month);
        }
        stats
    }

    pub fn record(&mut self, month: &str) {
        match self.entries.iter_mut().find(|(m, _)| m == month) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((month.to_string(), 1)),
        }
    }

    /// Sum over all months
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

// Serialized as an object; insertion order is kept
impl Serialize for MonthStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (month, count) in &self.entries {
            map.serialize_entry(month, count)?;
        }
        map.end()
    }
}
