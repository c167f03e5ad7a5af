use crate::services::access_service::AccessService;
use crate::services::admin_service::AdminService;
use crate::services::drop_service::DropService;
use crate::services::key_service::KeyService;

#[derive(Clone)]
pub struct AppState {
    pub admin_service: AdminService,
    pub access_service: AccessService,
    pub key_service: KeyService,
    pub drop_service: DropService,
    /// Cosmetic pause before a drop is delivered; 0 disables it.
    pub drop_delay_secs: u64,
}
