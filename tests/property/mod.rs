mod rotation;
mod window;
