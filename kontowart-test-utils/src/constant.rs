/// Username carrying the administrator role in test rosters.
pub static TEST_ADMIN_USERNAME: &str = "Admin";

/// Default non-admin username used by entry fixtures.
pub static TEST_FRIEND_USERNAME: &str = "Lena";

/// A second non-admin username for cross-owner visibility tests.
pub static TEST_OTHER_FRIEND_USERNAME: &str = "Jonas";
