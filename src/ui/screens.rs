pub(crate) mod budget;
pub(crate) mod dashboard;
