use crate::models::Region;
use crate::pipeline::SnipeCheck;

#[derive(Clone)]
pub struct AppState {
    pub snipe_check: SnipeCheck,
    pub default_region: Region,
    pub match_count: u32,
}
