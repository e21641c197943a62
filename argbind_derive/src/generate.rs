mod arguments;
mod parameter;
