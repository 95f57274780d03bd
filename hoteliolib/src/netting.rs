//! Сведение парных переводов в балансы по объектам.

use crate::{
    error::{HotelioError, Result},
    model::{CounterpartyShare, SiteBalance, SiteId, TransferRecord, TransferStatus},
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

#[derive(Default)]
struct Acc {
    gross_credit: Decimal,
    gross_debit: Decimal,
    owed_by: BTreeMap<SiteId, (Decimal, u32)>,
    owed_to: BTreeMap<SiteId, (Decimal, u32)>,
}

/// Сводит все не-void переводы в балансы. Каждый перевод входит ровно
/// один раз кредитом отправителя и дебетом получателя, поэтому сумма
/// всех net равна нулю. Кривая запись валит весь расчёт: молчаливый
/// пропуск незаметно сломал бы это равенство.
pub fn compute_balances(transfers: &[TransferRecord]) -> Result<Vec<SiteBalance>> {
    // void выбрасываем до валидации: на балансы они не влияют
    let included: Vec<&TransferRecord> = transfers
        .iter()
        .filter(|t| t.status != TransferStatus::Void)
        .collect();

    for t in &included {
        validate(t)?;
    }

    let mut accs: BTreeMap<SiteId, Acc> = BTreeMap::new();
    for t in &included {
        let o = accs.entry(t.origin.clone()).or_default();
        o.gross_credit += t.amount;
        let slot = o
            .owed_by
            .entry(t.destination.clone())
            .or_insert((Decimal::ZERO, 0));
        slot.0 += t.amount;
        slot.1 += 1;

        let d = accs.entry(t.destination.clone()).or_default();
        d.gross_debit += t.amount;
        let slot = d
            .owed_to
            .entry(t.origin.clone())
            .or_insert((Decimal::ZERO, 0));
        slot.0 += t.amount;
        slot.1 += 1;
    }

    let mut out: Vec<SiteBalance> = accs
        .into_iter()
        .map(|(site, acc)| SiteBalance {
            site,
            gross_credit: acc.gross_credit,
            gross_debit: acc.gross_debit,
            net: acc.gross_credit - acc.gross_debit,
            owed_by: to_shares(acc.owed_by),
            owed_to: to_shares(acc.owed_to),
        })
        .collect();

    // по убыванию net, при равенстве — по идентификатору объекта
    out.sort_by(|a, b| b.net.cmp(&a.net).then_with(|| a.site.cmp(&b.site)));
    Ok(out)
}

fn to_shares(map: BTreeMap<SiteId, (Decimal, u32)>) -> Vec<CounterpartyShare> {
    let mut shares: Vec<CounterpartyShare> = map
        .into_iter()
        .filter(|(_, (amount, _))| !amount.is_zero())
        .map(|(site, (amount, transfers))| CounterpartyShare {
            site,
            amount,
            transfers,
        })
        .collect();
    shares.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.site.cmp(&b.site)));
    shares
}

fn validate(t: &TransferRecord) -> Result<()> {
    if t.origin.as_str().is_empty() || t.destination.as_str().is_empty() {
        return Err(HotelioError::InvalidArgument(format!(
            "transfer {}: empty site id",
            t.record_id
        )));
    }
    if t.origin == t.destination {
        return Err(HotelioError::InvalidArgument(format!(
            "transfer {}: origin and destination are both {}",
            t.record_id, t.origin
        )));
    }
    if t.amount <= Decimal::ZERO {
        return Err(HotelioError::InvalidArgument(format!(
            "transfer {}: amount must be positive, got {}",
            t.record_id, t.amount
        )));
    }
    Ok(())
}
