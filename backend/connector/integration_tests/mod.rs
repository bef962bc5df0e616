mod fake_server;
mod session;
