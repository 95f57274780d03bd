//! Равное деление дневной ставки по объектам и диагностика расхождений.

use crate::{
    error::{HotelioError, Result},
    model::{AssignmentDelta, DriftReport, RateFix, WorkAssignment, Worker},
    traits::Store,
};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

/// Допуск по умолчанию: одна минимальная денежная единица, съедает
/// погрешность округления при делении на число объектов.
pub const DEFAULT_TOLERANCE: Decimal = Decimal::ONE;

/// Доля одного объекта при равном делении дневной ставки.
/// Округляем до целой единицы, половину — от нуля.
pub fn allocate(daily_rate: Decimal, site_count: usize) -> Result<Decimal> {
    if site_count < 1 {
        return Err(HotelioError::InvalidArgument(format!(
            "site count must be >= 1, got {site_count}"
        )));
    }
    if daily_rate < Decimal::ZERO {
        return Err(HotelioError::InvalidArgument(format!(
            "daily rate must be >= 0, got {daily_rate}"
        )));
    }
    Ok((daily_rate / Decimal::from(site_count as u64))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

/// Проверка одной группы (сотрудник, дата): группа считается «уехавшей»,
/// если хоть одна доля отличается от ожидаемой больше допуска, либо сумма
/// долей не сходится с дневной ставкой.
pub fn detect_drift(
    group: &[WorkAssignment],
    daily_rate: Decimal,
    tolerance: Decimal,
) -> Result<DriftReport> {
    let (worker_id, date) = group_key(group)?;
    let expected = allocate(daily_rate, group.len())?;

    let mut deltas = Vec::with_capacity(group.len());
    let mut total = Decimal::ZERO;
    let mut drifted = false;
    for a in group {
        let delta = a.allocated_rate - expected;
        if delta.abs() > tolerance {
            drifted = true;
        }
        total += a.allocated_rate;
        deltas.push(AssignmentDelta {
            assignment_id: a.assignment_id.clone(),
            current_rate: a.allocated_rate,
            expected_rate: expected,
            delta,
        });
    }
    if (total - daily_rate).abs() > tolerance {
        drifted = true;
    }

    Ok(DriftReport {
        worker_id: worker_id.to_string(),
        date,
        drifted,
        expected_share: expected,
        deltas,
    })
}

/// Полный набор исправлений для группы: каждой строке — пересчитанная
/// доля. Ничего не сохраняет; повторное применение ничего не меняет.
pub fn repair(group: &[WorkAssignment], daily_rate: Decimal) -> Result<Vec<RateFix>> {
    group_key(group)?;
    let share = allocate(daily_rate, group.len())?;
    Ok(group
        .iter()
        .map(|a| RateFix {
            assignment_id: a.assignment_id.clone(),
            new_rate: share,
        })
        .collect())
}

/// Проверка всей таблицы назначений: группируем по (сотрудник, дата),
/// возвращаем только группы с расхождением. Назначение на неизвестного
/// сотрудника — ошибка, а не молчаливый пропуск.
pub fn scan(
    assignments: &[WorkAssignment],
    workers: &[Worker],
    tolerance: Decimal,
) -> Result<Vec<DriftReport>> {
    let rates: BTreeMap<&str, Decimal> = workers
        .iter()
        .map(|w| (w.worker_id.as_str(), w.daily_rate))
        .collect();

    let mut groups: BTreeMap<(&str, NaiveDate), Vec<WorkAssignment>> = BTreeMap::new();
    for a in assignments {
        groups
            .entry((a.worker_id.as_str(), a.date))
            .or_default()
            .push(a.clone());
    }

    let mut reports = Vec::new();
    for ((worker_id, _), group) in &groups {
        let rate = rates
            .get(worker_id)
            .copied()
            .ok_or_else(|| HotelioError::NotFound(format!("worker {worker_id}")))?;
        let report = detect_drift(group, rate, tolerance)?;
        if report.drifted {
            reports.push(report);
        }
    }
    Ok(reports)
}

/// Применяет исправления через хранилище построчно. Возвращает строки,
/// которые сохранить не удалось — вызывающая сторона показывает их
/// пользователю, сами значения уже посчитаны целиком.
pub fn apply_fixes<S: Store>(store: &mut S, fixes: &[RateFix]) -> Vec<(String, HotelioError)> {
    let mut failed = Vec::new();
    for fix in fixes {
        if let Err(e) = store.persist_assignment_rate(&fix.assignment_id, fix.new_rate) {
            failed.push((fix.assignment_id.clone(), e));
        }
    }
    failed
}

fn group_key(group: &[WorkAssignment]) -> Result<(&str, NaiveDate)> {
    let first = group
        .first()
        .ok_or_else(|| HotelioError::InvalidArgument("assignment group is empty".into()))?;
    for a in &group[1..] {
        if a.worker_id != first.worker_id || a.date != first.date {
            return Err(HotelioError::InvalidArgument(format!(
                "mixed group: {}/{} vs {}/{}",
                first.worker_id, first.date, a.worker_id, a.date
            )));
        }
    }
    Ok((&first.worker_id, first.date))
}
