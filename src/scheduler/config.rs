pub mod expiry {
    /// Cron expression for the expiry sweep.
    /// Runs every 15 minutes at the top of the minute (:00, :15, :30, :45).
    pub const CRON_EXPRESSION: &str = "0 */15 * * * *";
}
