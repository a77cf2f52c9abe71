pub mod wxr_renderer;
