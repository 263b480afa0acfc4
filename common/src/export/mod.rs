//! 保証書の内容モデル（描画方法に依存しない）

pub mod certificate_core;
