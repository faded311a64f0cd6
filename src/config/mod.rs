pub mod settings;

use settings::Settings;
use std::path::Path;

/// 設定ファイル名。
pub const SETTINGS_FILE_NAME: &str = "image_source.yaml";

/// 指定ディレクトリから `image_source.yaml` を自動検出して読み込む。
///
/// ファイルが存在すれば読み込み、存在しなければデフォルト設定を返す。
pub fn load_settings(dir: &Path) -> crate::error::Result<Settings> {
    let settings_path = dir.join(SETTINGS_FILE_NAME);

    if settings_path.exists() {
        Settings::from_file(&settings_path)
    } else {
        Ok(Settings::default())
    }
}
