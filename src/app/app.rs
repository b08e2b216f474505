use std::sync::Arc;

use axum::{routing::get, Router};
use tracing::{info, warn};

use crate::config::{AdminUserConfig, AppConfig, JwtConfig, MongoConfig};
use crate::middlewares::auth_middleware::RoleGate;
use crate::repository::announcement_repo::{AnnouncementRepository, MongoAnnouncementRepository};
use crate::repository::category_repo::{CategoryRepository, MongoCategoryRepository};
use crate::repository::course_repo::{CourseRepository, MongoCourseRepository};
use crate::repository::mongo;
use crate::repository::user_repo::{MongoUserRepository, UserRepository};
use crate::router::announcement_router::announcement_router;
use crate::router::auth_router::auth_router;
use crate::router::category_router::category_router;
use crate::router::course_router::course_router;
use crate::router::instructor_router::instructor_router;
use crate::router::user_router::user_router;
use crate::service::announcement_service::AnnouncementServiceImpl;
use crate::service::auth_service::AuthServiceImpl;
use crate::service::category_service::CategoryServiceImpl;
use crate::service::course_service::CourseServiceImpl;
use crate::service::instructor_service::InstructorServiceImpl;
use crate::service::user_service::UserServiceImpl;
use crate::util::jwt::JwtTokenUtilsImpl;

/// The stores every service is built from.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub announcements: Arc<dyn AnnouncementRepository>,
}

/// Wires services, role gates and routes over the given stores.
pub fn build_router(repos: &Repositories, jwt_utils: Arc<JwtTokenUtilsImpl>) -> Router {
    let gate = RoleGate::new(jwt_utils.clone(), repos.users.clone());

    let auth_service = Arc::new(AuthServiceImpl::new(repos.users.clone(), jwt_utils));
    let category_service = Arc::new(CategoryServiceImpl::new(repos.categories.clone()));
    let course_service = Arc::new(CourseServiceImpl::new(
        repos.courses.clone(),
        repos.categories.clone(),
        repos.users.clone(),
    ));
    let instructor_service = Arc::new(InstructorServiceImpl::new(repos.users.clone(), repos.courses.clone()));
    let user_service = Arc::new(UserServiceImpl::new(repos.users.clone()));
    let announcement_service = Arc::new(AnnouncementServiceImpl::new(repos.announcements.clone()));

    Router::new()
        .merge(auth_router(auth_service, &gate))
        .merge(category_router(category_service, &gate))
        .merge(course_router(course_service, &gate))
        .merge(instructor_router(instructor_service, &gate))
        .merge(user_router(user_service, &gate))
        .merge(announcement_router(announcement_service, &gate))
        .route("/health", get(|| async { "OK" }))
}

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env();
        let jwt_config = JwtConfig::from_env()?;
        let mongo_config = MongoConfig::from_env()?;

        let db = mongo::connect(&mongo_config).await?;
        mongo::ensure_indexes(&db).await?;

        let repos = Repositories {
            users: Arc::new(MongoUserRepository::new(&db)),
            categories: Arc::new(MongoCategoryRepository::new(&db)),
            courses: Arc::new(MongoCourseRepository::new(&db)),
            announcements: Arc::new(MongoAnnouncementRepository::new(&db)),
        };

        Self::create_first_admin_user(&repos).await;

        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));
        let router = build_router(&repos, jwt_utils);
        Ok(App { config, router })
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.socket_addr()?;
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }

    async fn create_first_admin_user(repos: &Repositories) {
        let admin_conf = match AdminUserConfig::from_env() {
            Ok(c) => c,
            Err(e) => {
                warn!("Admin user config not loaded: {e}");
                return;
            }
        };
        let user_service = UserServiceImpl::new(repos.users.clone());
        if let Err(e) = user_service.seed_admin(&admin_conf).await {
            warn!("Admin seeding skipped: {e}");
        }
    }
}
