mod mock_store_tests;
