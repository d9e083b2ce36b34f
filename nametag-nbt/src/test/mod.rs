mod builder;
mod stream;

pub(crate) use builder::Builder;
