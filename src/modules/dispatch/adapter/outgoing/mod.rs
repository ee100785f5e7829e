pub mod job_queue_amqp;
pub mod job_queue_mock;
