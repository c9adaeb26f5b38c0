/// Postgres unique-constraint violation (SQLSTATE 23505). On the ledger's
/// `(car_id, date)` index this is the authoritative double-booking signal.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|e| e.code())
        .map_or(false, |code| code == "23505")
}
