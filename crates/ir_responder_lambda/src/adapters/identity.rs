/// Read/write seam over the external identity-management service.
///
/// Lookups that can legitimately find nothing return `Option`; the handler
/// decides whether an absence is an error.
pub trait IdentityDirectory {
    fn group_member_user_names(&self, group_name: &str) -> Result<Vec<String>, String>;
    fn attached_policy_names(&self, user_name: &str) -> Result<Vec<String>, String>;
    fn find_policy_arn(&self, policy_name: &str) -> Result<Option<String>, String>;
    fn attach_user_policy(&self, user_name: &str, policy_arn: &str) -> Result<(), String>;
}
