pub mod mock_store_server;
