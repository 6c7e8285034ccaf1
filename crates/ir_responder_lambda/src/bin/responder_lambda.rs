use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::{json, Value};

use ir_responder_core::config::ResponderConfig;
use ir_responder_lambda::adapters::identity::IdentityDirectory;
use ir_responder_lambda::adapters::notify::{ChatWebhook, TopicNotifier};
use ir_responder_lambda::handlers::respond::{handle_audit_event, ResponderResponse};

struct IamIdentityDirectory {
    iam_client: aws_sdk_iam::Client,
}

impl IdentityDirectory for IamIdentityDirectory {
    fn group_member_user_names(&self, group_name: &str) -> Result<Vec<String>, String> {
        let group_name = group_name.to_string();
        let client = self.iam_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .get_group()
                    .group_name(group_name)
                    .send()
                    .await
                    .map_err(|error| format!("failed to read group members: {error}"))?;

                Ok(output
                    .users()
                    .iter()
                    .map(|user| user.user_name().to_string())
                    .collect())
            })
        })
    }

    fn attached_policy_names(&self, user_name: &str) -> Result<Vec<String>, String> {
        let user_name = user_name.to_string();
        let client = self.iam_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .list_attached_user_policies()
                    .user_name(user_name)
                    .send()
                    .await
                    .map_err(|error| format!("failed to list attached user policies: {error}"))?;

                Ok(output
                    .attached_policies()
                    .iter()
                    .filter_map(|policy| policy.policy_name().map(str::to_string))
                    .collect())
            })
        })
    }

    fn find_policy_arn(&self, policy_name: &str) -> Result<Option<String>, String> {
        let policy_name = policy_name.to_string();
        let client = self.iam_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .list_policies()
                    .send()
                    .await
                    .map_err(|error| format!("failed to list policies: {error}"))?;

                Ok(output
                    .policies()
                    .iter()
                    .find(|policy| policy.policy_name() == Some(policy_name.as_str()))
                    .and_then(|policy| policy.arn().map(str::to_string)))
            })
        })
    }

    fn attach_user_policy(&self, user_name: &str, policy_arn: &str) -> Result<(), String> {
        let user_name = user_name.to_string();
        let policy_arn = policy_arn.to_string();
        let client = self.iam_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .attach_user_policy()
                    .user_name(user_name)
                    .policy_arn(policy_arn)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to attach user policy: {error}"))
            })
        })
    }
}

struct SnsTopicNotifier {
    sns_client: aws_sdk_sns::Client,
}

impl TopicNotifier for SnsTopicNotifier {
    fn find_topic_arn(&self, name_fragment: &str) -> Result<Option<String>, String> {
        let name_fragment = name_fragment.to_string();
        let client = self.sns_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .list_topics()
                    .send()
                    .await
                    .map_err(|error| format!("failed to list topics: {error}"))?;

                Ok(output
                    .topics()
                    .iter()
                    .filter_map(|topic| topic.topic_arn())
                    .find(|arn| arn.contains(name_fragment.as_str()))
                    .map(str::to_string))
            })
        })
    }

    fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> Result<(), String> {
        let topic_arn = topic_arn.to_string();
        let subject = subject.to_string();
        let message = message.to_string();
        let client = self.sns_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .publish()
                    .topic_arn(topic_arn)
                    .subject(subject)
                    .message(message)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to publish to topic: {error}"))
            })
        })
    }
}

struct SlackChatWebhook {
    http_client: reqwest::Client,
    webhook_url: String,
}

impl ChatWebhook for SlackChatWebhook {
    fn post(&self, channel: &str, text: &str) -> Result<(), String> {
        let body = json!({"channel": channel, "text": text});
        let url = self.webhook_url.clone();
        let client = self.http_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .post(url)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|error| format!("failed to post chat notification: {error}"))?
                    .error_for_status()
                    .map(|_| ())
                    .map_err(|error| format!("chat webhook rejected the notification: {error}"))
            })
        })
    }
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<ResponderResponse, Error> {
    let config = ResponderConfig::from_env().map_err(|error| Error::from(error.to_string()))?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let directory = IamIdentityDirectory {
        iam_client: aws_sdk_iam::Client::new(&aws_config),
    };
    let notifier = SnsTopicNotifier {
        sns_client: aws_sdk_sns::Client::new(&aws_config),
    };
    let webhook = SlackChatWebhook {
        http_client: reqwest::Client::new(),
        webhook_url: config.webhook_url.clone(),
    };

    handle_audit_event(event.payload, &config, &directory, &notifier, &webhook)
        .map_err(|error| Error::from(error.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
