use lambda_runtime::{service_fn, Error, LambdaEvent};
use relay_lambda::adapters::delay::ThreadSleepDelay;
use relay_lambda::adapters::message_log::TracingMessageLog;
use relay_lambda::handlers::consume::{handle_queue_event, ConsumerCapabilities};
use relay_lambda::logging;
use relay_lambda::runtime::batch::SqsBatchResponse;
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<SqsBatchResponse, Error> {
    let capabilities = ConsumerCapabilities {
        delay: &ThreadSleepDelay,
        log: &TracingMessageLog,
    };

    // The simulated workload holds the thread, so keep it off the async workers.
    let response =
        tokio::task::block_in_place(|| handle_queue_event(&event.payload, capabilities))?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();
    lambda_runtime::run(service_fn(handle_request)).await
}
