//! Режим «без внешней базы»: весь набор данных одним JSON-файлом.
//! Транзакционной изоляции здесь нет, запись построчная — как и
//! договорено контрактом хранилища.

use crate::{
    error::{HotelioError, Result},
    formats::json::Json,
    model::{Dataset, TransferRecord, WorkAssignment, Worker},
    traits::{AssignmentFilter, ReadFormat, Store, TransferFilter, WriteFormat},
};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

pub struct JsonStore {
    dataset: Dataset,
}

impl JsonStore {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let f = File::open(path)?;
        Ok(Self {
            dataset: Json::read(BufReader::new(f))?,
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let f = File::create(path)?;
        Json::write(BufWriter::new(f), &self.dataset)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}

impl Store for JsonStore {
    fn fetch_workers(&self) -> Result<Vec<Worker>> {
        Ok(self.dataset.workers.clone())
    }

    fn fetch_worker(&self, worker_id: &str) -> Result<Worker> {
        self.dataset
            .workers
            .iter()
            .find(|w| w.worker_id == worker_id)
            .cloned()
            .ok_or_else(|| HotelioError::NotFound(format!("worker {worker_id}")))
    }

    fn fetch_assignments(&self, filter: &AssignmentFilter) -> Result<Vec<WorkAssignment>> {
        Ok(self
            .dataset
            .assignments
            .iter()
            .filter(|a| {
                filter
                    .worker_id
                    .as_deref()
                    .map_or(true, |w| a.worker_id == w)
                    && filter.from.map_or(true, |d| a.date >= d)
                    && filter.to.map_or(true, |d| a.date <= d)
            })
            .cloned()
            .collect())
    }

    fn fetch_transfers(&self, filter: &TransferFilter) -> Result<Vec<TransferRecord>> {
        Ok(self
            .dataset
            .transfers
            .iter()
            .filter(|t| {
                filter.status.map_or(true, |s| t.status == s)
                    && filter.from.map_or(true, |d| t.date >= d)
                    && filter.to.map_or(true, |d| t.date <= d)
            })
            .cloned()
            .collect())
    }

    fn persist_assignment_rate(&mut self, assignment_id: &str, new_rate: Decimal) -> Result<()> {
        let a = self
            .dataset
            .assignments
            .iter_mut()
            .find(|a| a.assignment_id == assignment_id)
            .ok_or_else(|| HotelioError::NotFound(format!("assignment {assignment_id}")))?;
        a.allocated_rate = new_rate;
        Ok(())
    }
}
