use async_trait::async_trait;

use crate::errors::Result;
use crate::partnerships::partnerships_model::{
    Invite, Partnership, PartnershipStatus, PartnerGoal, RemoteInvite, RemotePartnership,
};

/// Trait for partnership/invite/partner-goal repository operations.
#[async_trait]
pub trait PartnershipRepositoryTrait: Send + Sync {
    fn get_partnership_for_user(&self, user_id: &str) -> Result<Option<Partnership>>;
    async fn upsert_partnership(&self, partnership: Partnership) -> Result<Partnership>;
    async fn set_partnership_status(
        &self,
        partnership_id: &str,
        status: PartnershipStatus,
    ) -> Result<Option<Partnership>>;

    fn get_invite_by_code(&self, code: &str) -> Result<Option<Invite>>;
    async fn upsert_invite(&self, invite: Invite) -> Result<Invite>;

    fn load_partner_goals_for_owner(&self, owner_id: &str) -> Result<Vec<PartnerGoal>>;
    async fn upsert_partner_goals(&self, goals: Vec<PartnerGoal>) -> Result<usize>;
    async fn delete_partner_goals_for_owner(&self, owner_id: &str) -> Result<usize>;
}

/// Remote authority for invite issuance and partnership state.
///
/// Consumed, not owned: invite codes must be globally unique and accepting
/// one is racy between devices, which a purely local cache cannot arbitrate.
/// Implementations translate remote failures into the `PartnerError`
/// taxonomy via `classify_remote_error`.
#[async_trait]
pub trait PartnerRemoteApi: Send + Sync {
    async fn create_invite(&self, creator_id: &str) -> Result<RemoteInvite>;
    async fn accept_invite(&self, code: &str, acceptor_id: &str) -> Result<RemotePartnership>;
    async fn cancel_invite(&self, code: &str, creator_id: &str) -> Result<()>;
    async fn dissolve_partnership(&self, user_id: &str) -> Result<()>;
    async fn get_partner(&self, user_id: &str) -> Result<Option<RemotePartnership>>;
}

/// Trait for the invite pairing flow.
#[async_trait]
pub trait InviteServiceTrait: Send + Sync {
    async fn create_invite(&self, creator_id: &str) -> Result<Invite>;
    async fn accept_invite(&self, code: &str, acceptor_id: &str) -> Result<Partnership>;
    async fn cancel_invite(&self, code: &str, creator_id: &str) -> Result<Option<Invite>>;
    async fn dissolve_partnership(&self, user_id: &str) -> Result<()>;
    /// Remote lookup with local-mirror refresh; falls back to the cached
    /// partnership when the network is unavailable.
    async fn get_partner(&self, user_id: &str) -> Result<Option<Partnership>>;
}
