pub mod http_test_utils;
pub mod mock_user_store;
pub mod sql_test_utils;
pub mod test_logging;
