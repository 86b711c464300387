use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

/// Column order of the output artifact
pub const HEADER: [&str; 5] = ["title", "price", "rating", "reviews", "availability"];

/// One row of extracted data for a single detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    pub price: String,
    pub rating: String,
    pub reviews: String,
    pub availability: String,
}

impl ProductRecord {
    /// Records without a title are dropped before the artifact is written
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Ordered records of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<ProductRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ProductRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ProductRecord> {
        self.records
    }

    /// Drops every record with an empty title, keeping the order of the rest.
    pub fn retain_titled(mut self) -> Self {
        let before = self.records.len();
        self.records.retain(ProductRecord::has_title);
        ::log::debug!(
            "Dropped {} untitled record(s), {} remain",
            before - self.records.len(),
            self.records.len()
        );
        self
    }

    /// Writes the header row followed by one row per record.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        // serialize() only emits a header once a row exists
        wtr.write_record(HEADER)?;
        for record in &self.records {
            wtr.write_record([
                &record.title,
                &record.price,
                &record.rating,
                &record.reviews,
                &record.availability,
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Overwrites `path` with the CSV rendering of this dataset.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)?;
        self.write_csv(file)?;
        ::log::info!("Wrote {} record(s) to {}", self.len(), path.display());
        Ok(())
    }

    pub fn read_csv<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut dataset = Self::new();
        for row in rdr.deserialize() {
            let record: ProductRecord = row?;
            dataset.push(record);
        }
        Ok(dataset)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::read_csv(file)
    }
}

impl FromIterator<ProductRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = ProductRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
