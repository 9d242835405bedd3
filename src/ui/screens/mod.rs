pub(crate) mod add;
pub(crate) mod assets;
pub(crate) mod dashboard;
