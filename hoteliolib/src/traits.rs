//! Швы между ядром и внешним миром: форматы на std::io::{BufRead, Write}
//! и коллаборатор-хранилище записей.

use crate::{
    error::Result,
    model::{Dataset, TransferRecord, TransferStatus, WorkAssignment, Worker},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

pub trait ReadFormat {
    fn read<R: BufRead>(r: R) -> Result<Dataset>;
}

pub trait WriteFormat {
    fn write<W: Write>(w: W, ds: &Dataset) -> Result<()>;
}

pub trait Format: ReadFormat + WriteFormat {}
impl<T: ReadFormat + WriteFormat> Format for T {}

/// Фильтр назначений: по сотруднику и/или диапазону дат (включительно).
#[derive(Debug, Clone, Default)]
pub struct AssignmentFilter {
    pub worker_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Фильтр переводов: по статусу и/или диапазону дат (включительно).
#[derive(Debug, Clone, Default)]
pub struct TransferFilter {
    pub status: Option<TransferStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Хранилище записей. Ядро само в I/O не ходит: расчёты получают уже
/// загруженные данные, а исправления применяются построчно через
/// `persist_assignment_rate`.
pub trait Store {
    fn fetch_workers(&self) -> Result<Vec<Worker>>;
    fn fetch_worker(&self, worker_id: &str) -> Result<Worker>;
    fn fetch_assignments(&self, filter: &AssignmentFilter) -> Result<Vec<WorkAssignment>>;
    fn fetch_transfers(&self, filter: &TransferFilter) -> Result<Vec<TransferRecord>>;
    fn persist_assignment_rate(&mut self, assignment_id: &str, new_rate: Decimal) -> Result<()>;
}
