use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;

use crate::errors::{Error, Result};

use super::partnerships_errors::PartnerError;
use super::partnerships_model::{Invite, InviteStatus, Partnership, PartnershipStatus};
use super::partnerships_traits::{
    InviteServiceTrait, PartnerRemoteApi, PartnershipRepositoryTrait,
};

/// Thin reconciliation layer over the remote pairing authority.
///
/// Every operation goes remote-first; the local cache is a passive mirror
/// kept fresh for offline display.
pub struct InviteService {
    remote: Arc<dyn PartnerRemoteApi>,
    repository: Arc<dyn PartnershipRepositoryTrait>,
}

impl InviteService {
    pub fn new(
        remote: Arc<dyn PartnerRemoteApi>,
        repository: Arc<dyn PartnershipRepositoryTrait>,
    ) -> Self {
        InviteService { remote, repository }
    }

    async fn mirror_partnership(&self, partnership: Partnership) -> Result<Partnership> {
        self.repository.upsert_partnership(partnership).await
    }
}

#[async_trait]
impl InviteServiceTrait for InviteService {
    async fn create_invite(&self, creator_id: &str) -> Result<Invite> {
        let remote = self.remote.create_invite(creator_id).await?;
        let invite = Invite {
            code: remote.code,
            creator_id: remote.creator_id,
            created_at: remote.created_at,
            expires_at: remote.expires_at,
            accepted_by: None,
            accepted_at: None,
            status: remote.status,
        };
        self.repository.upsert_invite(invite).await
    }

    async fn accept_invite(&self, code: &str, acceptor_id: &str) -> Result<Partnership> {
        let remote = self.remote.accept_invite(code, acceptor_id).await?;
        let partnership = self.mirror_partnership(Partnership::from(remote)).await?;

        // refresh the cached invite when we hold one
        if let Some(mut invite) = self.repository.get_invite_by_code(code)? {
            invite.status = InviteStatus::Accepted;
            invite.accepted_by = Some(acceptor_id.to_string());
            invite.accepted_at = Some(Utc::now());
            self.repository.upsert_invite(invite).await?;
        }
        Ok(partnership)
    }

    async fn cancel_invite(&self, code: &str, creator_id: &str) -> Result<Option<Invite>> {
        self.remote.cancel_invite(code, creator_id).await?;
        let Some(mut invite) = self.repository.get_invite_by_code(code)? else {
            return Ok(None);
        };
        invite.status = InviteStatus::Cancelled;
        Ok(Some(self.repository.upsert_invite(invite).await?))
    }

    async fn dissolve_partnership(&self, user_id: &str) -> Result<()> {
        self.remote.dissolve_partnership(user_id).await?;

        if let Some(partnership) = self.repository.get_partnership_for_user(user_id)? {
            let partner_id = partnership.partner_of(user_id).map(str::to_string);
            self.repository
                .set_partnership_status(&partnership.id, PartnershipStatus::Dissolved)
                .await?;
            if let Some(partner_id) = partner_id {
                let dropped = self
                    .repository
                    .delete_partner_goals_for_owner(&partner_id)
                    .await?;
                debug!("dropped {dropped} mirrored goals after dissolving partnership");
            }
        }
        Ok(())
    }

    async fn get_partner(&self, user_id: &str) -> Result<Option<Partnership>> {
        match self.remote.get_partner(user_id).await {
            Ok(Some(remote)) => {
                let partnership = self.mirror_partnership(Partnership::from(remote)).await?;
                Ok(Some(partnership))
            }
            Ok(None) => {
                // remote is authoritative: retire a stale local mirror
                if let Some(local) = self.repository.get_partnership_for_user(user_id)? {
                    if local.status == PartnershipStatus::Active {
                        self.repository
                            .set_partnership_status(&local.id, PartnershipStatus::Dissolved)
                            .await?;
                    }
                }
                Ok(None)
            }
            Err(Error::Partner(PartnerError::NetworkError(message))) => {
                debug!("get_partner offline ({message}), serving cached partnership");
                let cached = self
                    .repository
                    .get_partnership_for_user(user_id)?
                    .filter(|p| p.status == PartnershipStatus::Active);
                Ok(cached)
            }
            Err(err) => Err(err),
        }
    }
}
