mod window;
mod wire;
