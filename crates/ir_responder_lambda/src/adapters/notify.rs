/// Pub/sub notification seam. Topic resolution is by name fragment because
/// the external service only lists full ARNs.
pub trait TopicNotifier {
    fn find_topic_arn(&self, name_fragment: &str) -> Result<Option<String>, String>;
    fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> Result<(), String>;
}

/// Chat webhook seam: an HTTPS POST with a `{channel, text}` JSON body.
pub trait ChatWebhook {
    fn post(&self, channel: &str, text: &str) -> Result<(), String>;
}
