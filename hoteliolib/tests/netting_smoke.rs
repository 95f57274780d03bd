use chrono::NaiveDate;
use hoteliolib::{
    model::{SiteId, TransferRecord, TransferStatus},
    netting::compute_balances,
};
use rust_decimal::Decimal;

fn tr(id: &str, from: &str, to: &str, amount: i64, status: TransferStatus) -> TransferRecord {
    TransferRecord {
        record_id: id.to_string(),
        origin: SiteId::new(from),
        destination: SiteId::new(to),
        amount: Decimal::new(amount, 0),
        status,
        date: NaiveDate::from_ymd_opt(2025, 10, 1).expect("date"),
    }
}

#[test]
fn chain_example() {
    let balances = compute_balances(&[
        tr("t1", "A", "B", 5000, TransferStatus::Pending),
        tr("t2", "B", "C", 3000, TransferStatus::Pending),
    ])
    .expect("balances");

    assert_eq!(balances.len(), 3);
    // по убыванию net: A(5000), B(-2000), C(-3000)
    let a = &balances[0];
    assert_eq!(a.site, SiteId::new("A"));
    assert_eq!(a.gross_credit, Decimal::new(5000, 0));
    assert_eq!(a.gross_debit, Decimal::ZERO);
    assert_eq!(a.net, Decimal::new(5000, 0));
    assert_eq!(a.owed_by.len(), 1);
    assert_eq!(a.owed_by[0].site, SiteId::new("B"));
    assert_eq!(a.owed_by[0].amount, Decimal::new(5000, 0));
    assert!(a.owed_to.is_empty());

    let b = &balances[1];
    assert_eq!(b.site, SiteId::new("B"));
    assert_eq!(b.gross_credit, Decimal::new(3000, 0));
    assert_eq!(b.gross_debit, Decimal::new(5000, 0));
    assert_eq!(b.net, Decimal::new(-2000, 0));
    assert_eq!(b.owed_to[0].site, SiteId::new("A"));
    assert_eq!(b.owed_by[0].site, SiteId::new("C"));

    let c = &balances[2];
    assert_eq!(c.site, SiteId::new("C"));
    assert_eq!(c.net, Decimal::new(-3000, 0));
    assert_eq!(c.owed_to[0].site, SiteId::new("B"));
    assert_eq!(c.owed_to[0].amount, Decimal::new(3000, 0));
    assert!(c.owed_by.is_empty());
}

#[test]
fn nets_sum_to_zero() {
    let balances = compute_balances(&[
        tr("t1", "A", "B", 120, TransferStatus::Pending),
        tr("t2", "B", "C", 75, TransferStatus::Settled),
        tr("t3", "C", "A", 300, TransferStatus::Pending),
        tr("t4", "A", "C", 45, TransferStatus::Settled),
        tr("t5", "B", "A", 120, TransferStatus::Pending),
    ])
    .expect("balances");
    let total: Decimal = balances.iter().map(|b| b.net).sum();
    assert_eq!(total, Decimal::ZERO);
}

#[test]
fn void_transfer_is_ignored() {
    let base =
        compute_balances(&[tr("t1", "A", "B", 100, TransferStatus::Pending)]).expect("balances");
    let with_void = compute_balances(&[
        tr("t1", "A", "B", 100, TransferStatus::Pending),
        tr("t2", "B", "A", 9999, TransferStatus::Void),
    ])
    .expect("balances");
    assert_eq!(base, with_void);
}

#[test]
fn repeated_pair_accumulates() {
    let balances = compute_balances(&[
        tr("t1", "A", "B", 100, TransferStatus::Pending),
        tr("t2", "A", "B", 50, TransferStatus::Settled),
    ])
    .expect("balances");
    let a = balances
        .iter()
        .find(|b| b.site == SiteId::new("A"))
        .expect("A");
    assert_eq!(a.owed_by.len(), 1);
    assert_eq!(a.owed_by[0].amount, Decimal::new(150, 0));
    assert_eq!(a.owed_by[0].transfers, 2);
}

#[test]
fn counterparty_lists_never_hold_zero_amounts() {
    let balances = compute_balances(&[
        tr("t1", "A", "B", 10, TransferStatus::Pending),
        tr("t2", "B", "A", 10, TransferStatus::Pending),
    ])
    .expect("balances");
    for b in &balances {
        assert!(b.owed_by.iter().all(|s| !s.amount.is_zero()));
        assert!(b.owed_to.iter().all(|s| !s.amount.is_zero()));
    }
}

#[test]
fn sorted_by_net_then_site() {
    let balances = compute_balances(&[
        tr("t1", "A", "B", 100, TransferStatus::Pending),
        tr("t2", "A", "C", 300, TransferStatus::Pending),
        tr("t3", "A", "D", 300, TransferStatus::Pending),
    ])
    .expect("balances");
    // C и D равны по net (-300) — разруливаем по идентификатору
    let order: Vec<&str> = balances.iter().map(|b| b.site.as_str()).collect();
    assert_eq!(order, ["A", "B", "C", "D"]);

    // контрагенты A: по убыванию суммы, при равенстве по идентификатору
    let owed: Vec<&str> = balances[0].owed_by.iter().map(|s| s.site.as_str()).collect();
    assert_eq!(owed, ["C", "D", "B"]);
}

#[test]
fn malformed_transfer_fails_whole_call() {
    assert!(compute_balances(&[tr("t1", "A", "A", 100, TransferStatus::Pending)]).is_err());
    assert!(compute_balances(&[tr("t1", "A", "B", 0, TransferStatus::Pending)]).is_err());
    assert!(compute_balances(&[tr("t1", "A", "B", -5, TransferStatus::Pending)]).is_err());
    assert!(compute_balances(&[tr("t1", "", "B", 10, TransferStatus::Pending)]).is_err());
}

#[test]
fn malformed_void_transfer_is_still_excluded() {
    // void выбрасывается до валидации
    let balances =
        compute_balances(&[tr("t1", "A", "A", 0, TransferStatus::Void)]).expect("balances");
    assert!(balances.is_empty());
}
