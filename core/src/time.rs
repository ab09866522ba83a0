pub mod clock;
pub mod reltime;

use chrono::{DateTime, Local};

pub type DTL = DateTime<Local>;
