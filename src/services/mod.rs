pub mod forms;
pub mod stats;
pub mod subjects;
pub mod system;
pub mod users;
pub mod views;

pub use forms::FormService;
pub use stats::StatsService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use users::UserService;
pub use views::ViewService;

use actix_web::HttpRequest;
use std::sync::Arc;

use crate::runtime::AppState;

/// 从 app data 中取出共享状态
pub(crate) fn state_from_request(request: &HttpRequest) -> Arc<AppState> {
    request
        .app_data::<actix_web::web::Data<Arc<AppState>>>()
        .expect("AppState not found in app data")
        .get_ref()
        .clone()
}
