pub mod fake_service;
pub mod mock_dialpad_server;
