use lambda_runtime::{service_fn, Error, LambdaEvent};
use relay_lambda::adapters::sns::SnsTopicPublisher;
use relay_lambda::config::PublisherConfig;
use relay_lambda::handlers::publish::{handle_publish_event, ApiGatewayResponse};
use relay_lambda::logging;
use serde_json::Value;

async fn handle_request(
    event: LambdaEvent<Value>,
    publisher: &SnsTopicPublisher,
) -> Result<ApiGatewayResponse, Error> {
    let config = PublisherConfig::from_env();
    Ok(handle_publish_event(
        event.payload,
        config.topic_arn.as_deref(),
        publisher,
    ))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let publisher = SnsTopicPublisher::new(aws_sdk_sns::Client::new(&aws_config));
    let publisher = &publisher;

    lambda_runtime::run(service_fn(move |event| handle_request(event, publisher))).await
}
