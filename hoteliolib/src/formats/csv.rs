//! CSV-таблицы, два вида. Заголовки:
//! переводы: record_id,date,origin,destination,amount,status
//! назначения: assignment_id,worker_id,site,date,allocated_rate,note

use crate::{
    error::{HotelioError, Result},
    model::{Dataset, SiteId, TransferRecord, TransferStatus, WorkAssignment},
    traits::{ReadFormat, WriteFormat},
};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

#[derive(serde::Deserialize)]
struct TransferRow {
    record_id: String,
    date: String,
    origin: String,
    destination: String,
    amount: String,
    status: String,
}

#[derive(serde::Serialize)]
struct TransferOutRow<'a> {
    record_id: &'a str,
    date: String,
    origin: &'a str,
    destination: &'a str,
    amount: String,
    status: &'a str,
}

/// Таблица переводов. Чтение даёт набор данных только с переводами.
pub struct TransfersCsv;

impl ReadFormat for TransfersCsv {
    fn read<R: BufRead>(r: R) -> Result<Dataset> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(r);
        let mut transfers = Vec::new();
        for rec in rdr.deserialize::<TransferRow>() {
            let row = rec?;
            transfers.push(TransferRecord {
                record_id: row.record_id,
                date: parse_date(&row.date, "date")?,
                origin: SiteId::new(row.origin),
                destination: SiteId::new(row.destination),
                amount: parse_amount(&row.amount, "amount")?,
                status: parse_status(&row.status)?,
            });
        }
        Ok(Dataset {
            transfers,
            ..Dataset::default()
        })
    }
}

impl WriteFormat for TransfersCsv {
    fn write<W: Write>(mut w: W, ds: &Dataset) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);
        for t in &ds.transfers {
            let out = TransferOutRow {
                record_id: &t.record_id,
                date: t.date.format("%Y-%m-%d").to_string(),
                origin: t.origin.as_str(),
                destination: t.destination.as_str(),
                amount: t.amount.to_string(),
                status: status_str(t.status),
            };
            wrt.serialize(out)?;
        }
        wrt.flush()?;
        Ok(())
    }
}

#[derive(serde::Deserialize)]
struct AssignmentRow {
    assignment_id: String,
    worker_id: String,
    site: String,
    date: String,
    allocated_rate: String,
    note: Option<String>,
}

#[derive(serde::Serialize)]
struct AssignmentOutRow<'a> {
    assignment_id: &'a str,
    worker_id: &'a str,
    site: &'a str,
    date: String,
    allocated_rate: String,
    note: &'a Option<String>,
}

/// Таблица назначений. Чтение даёт набор данных только с назначениями.
pub struct AssignmentsCsv;

impl ReadFormat for AssignmentsCsv {
    fn read<R: BufRead>(r: R) -> Result<Dataset> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(r);
        let mut assignments = Vec::new();
        for rec in rdr.deserialize::<AssignmentRow>() {
            let row = rec?;
            assignments.push(WorkAssignment {
                assignment_id: row.assignment_id,
                worker_id: row.worker_id,
                site: SiteId::new(row.site),
                date: parse_date(&row.date, "date")?,
                allocated_rate: parse_amount(&row.allocated_rate, "allocated_rate")?,
                note: row.note.filter(|s| !s.is_empty()),
            });
        }
        Ok(Dataset {
            assignments,
            ..Dataset::default()
        })
    }
}

impl WriteFormat for AssignmentsCsv {
    fn write<W: Write>(mut w: W, ds: &Dataset) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);
        for a in &ds.assignments {
            let out = AssignmentOutRow {
                assignment_id: &a.assignment_id,
                worker_id: &a.worker_id,
                site: a.site.as_str(),
                date: a.date.format("%Y-%m-%d").to_string(),
                allocated_rate: a.allocated_rate.to_string(),
                note: &a.note,
            };
            wrt.serialize(out)?;
        }
        wrt.flush()?;
        Ok(())
    }
}

fn parse_date(s: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| HotelioError::Parse(format!("{field}: {e}")))
}

fn parse_amount(s: &str, field: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|e| HotelioError::Parse(format!("{field}: {e}")))
}

fn parse_status(s: &str) -> Result<TransferStatus> {
    match s.trim().to_ascii_lowercase().as_str() {
        "pending" => Ok(TransferStatus::Pending),
        "settled" => Ok(TransferStatus::Settled),
        "void" => Ok(TransferStatus::Void),
        other => Err(HotelioError::Parse(format!("unknown status: {other}"))),
    }
}

fn status_str(s: TransferStatus) -> &'static str {
    match s {
        TransferStatus::Pending => "pending",
        TransferStatus::Settled => "settled",
        TransferStatus::Void => "void",
    }
}
