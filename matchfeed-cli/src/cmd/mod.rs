pub mod descriptor;
pub mod fetch;
pub mod job;
pub mod replay;
pub mod steamid;
