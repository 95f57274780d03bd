//! Доменные модели — единый «нормализованный» слой между форматами,
//! хранилищем и расчётами.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Непрозрачный идентификатор отеля/объекта. Нормализуем на границе
/// (обрезаем пробелы), дальше сравниваем только как есть.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Сотрудник с фиксированной дневной ставкой (за день целиком,
/// сколько бы объектов он ни посетил).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Worker {
    pub worker_id: String,
    pub daily_rate: Decimal,
    pub active: bool,
}

/// Присутствие сотрудника на одном объекте в одну дату.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkAssignment {
    pub assignment_id: String,
    pub worker_id: String,
    pub site: SiteId,
    pub date: NaiveDate,
    pub allocated_rate: Decimal,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Pending,
    Settled,
    Void,
}

/// Межотельный перевод: направленное движение денег/товара.
/// Записи не удаляются, отмена — через статус void.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferRecord {
    pub record_id: String,
    pub origin: SiteId,
    pub destination: SiteId,
    pub amount: Decimal,
    pub status: TransferStatus,
    pub date: NaiveDate,
}

/// Доля контрагента в балансе: сколько накоплено и в скольких переводах.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CounterpartyShare {
    pub site: SiteId,
    pub amount: Decimal,
    pub transfers: u32,
}

/// Производный баланс объекта; не хранится, всегда пересчитывается
/// из переводов.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteBalance {
    pub site: SiteId,
    pub gross_credit: Decimal,
    pub gross_debit: Decimal,
    pub net: Decimal,
    pub owed_by: Vec<CounterpartyShare>,
    pub owed_to: Vec<CounterpartyShare>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssignmentDelta {
    pub assignment_id: String,
    pub current_rate: Decimal,
    pub expected_rate: Decimal,
    pub delta: Decimal,
}

/// Диагностика одной группы (сотрудник, дата): расходятся ли сохранённые
/// доли с равным делением ставки. Это обычный результат, не ошибка.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriftReport {
    pub worker_id: String,
    pub date: NaiveDate,
    pub drifted: bool,
    pub expected_share: Decimal,
    pub deltas: Vec<AssignmentDelta>,
}

/// Целевое значение доли для одной строки назначения.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateFix {
    pub assignment_id: String,
    pub new_rate: Decimal,
}

/// Снимок всех таблиц разом; между форматами и хранилищем ходит
/// именно он.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    pub workers: Vec<Worker>,
    pub assignments: Vec<WorkAssignment>,
    pub transfers: Vec<TransferRecord>,
}
