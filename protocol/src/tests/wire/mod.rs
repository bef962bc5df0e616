mod ack;
mod event_record;
mod request;
