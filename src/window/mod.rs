mod repaint;
pub use repaint::*;
