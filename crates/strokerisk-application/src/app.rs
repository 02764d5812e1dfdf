//! Composition root: builds every use case from an [`AppConfig`].

use std::sync::Arc;

use strokerisk_core::Result;
use strokerisk_core::config::AppConfig;
use strokerisk_core::notification::Notifier;
use strokerisk_core::profile::ProfileRepository;
use strokerisk_core::scan::ScanHistory;
use strokerisk_infrastructure::{
    InMemoryProfileRepository, InMemoryScanHistory, MockAuthService, MockScanService,
    StaticHospitalLocator,
};

use crate::auth_usecase::AuthUseCase;
use crate::emergency_usecase::EmergencyUseCase;
use crate::profile_usecase::ProfileWizardUseCase;
use crate::scan_usecase::ScanUseCase;
use crate::session_context::SessionContext;

/// All use cases of one running application, backed by the in-process mocks.
pub struct StrokeRiskApp {
    pub config: AppConfig,
    pub session: SessionContext,
    pub auth: AuthUseCase,
    pub scans: ScanUseCase,
    pub emergency: EmergencyUseCase,
    auth_backend: Arc<MockAuthService>,
    profiles: Arc<dyn ProfileRepository>,
    notifier: Arc<dyn Notifier>,
}

impl StrokeRiskApp {
    /// Wires the mocks and starts the session context. The session stays
    /// `Settling` until [`settle`](Self::settle).
    pub fn new(config: AppConfig, notifier: Arc<dyn Notifier>) -> Self {
        let latency = config.mock;
        let auth_backend = Arc::new(MockAuthService::new(latency));
        let profiles: Arc<dyn ProfileRepository> = Arc::new(InMemoryProfileRepository::new(latency));
        let history: Arc<dyn ScanHistory> = Arc::new(InMemoryScanHistory::new(latency));
        let scanner = Arc::new(MockScanService::new(history.clone(), config.risk, latency));
        let locator = Arc::new(StaticHospitalLocator::new(latency));

        let session = SessionContext::start(auth_backend.clone(), config.session.sign_in_route.clone());
        let auth = AuthUseCase::new(auth_backend.clone(), notifier.clone());
        let scans = ScanUseCase::new(scanner, history);
        let emergency = EmergencyUseCase::new(
            locator,
            config.location.coordinates(),
            config.emergency.phone_number.clone(),
        );

        Self {
            config,
            session,
            auth,
            scans,
            emergency,
            auth_backend,
            profiles,
            notifier,
        }
    }

    /// Lets the identity backend report its initial state.
    pub fn settle(&self) {
        self.auth_backend.settle();
    }

    /// Opens a new profile wizard session.
    pub async fn open_profile_wizard(&self) -> Result<ProfileWizardUseCase> {
        ProfileWizardUseCase::open(self.profiles.clone(), self.notifier.clone()).await
    }

    pub fn shutdown(self) {
        self.session.shutdown();
    }
}
