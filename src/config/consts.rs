// src/config/consts.rs
use chrono_tz::Tz;

use crate::model::DeadlineCategory;
use crate::query::SortMode;

// Net config
pub const TARGET_URL: &str =
    "https://www.kaa.org.tw/public_list_1.php?t=0&search_input1=&search_input2=&search_input3=&b=1";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36";
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// Dates
pub const REFERENCE_TZ: Tz = chrono_tz::Asia::Taipei;
pub const DUE_SOON_DAYS: i64 = 7;
/// Years below this are Minguo (ROC) years.
pub const ROC_YEAR_LIMIT: i32 = 1000;
pub const ROC_YEAR_OFFSET: i32 = 1911;

// Publish
pub const DEFAULT_OUT_DIR: &str = "public/data";
pub const SNAPSHOT_FILE: &str = "documents.json";

// Extract
pub const ATTACHMENT_PLACEHOLDER: &str = "附件";
pub const MIN_ROW_CELLS: usize = 4;

// View defaults
pub const DEFAULT_STATUSES: [DeadlineCategory; 2] = [DeadlineCategory::DueSoon, DeadlineCategory::Active];
pub const DEFAULT_SORT: SortMode = SortMode::DeadlineAsc;
