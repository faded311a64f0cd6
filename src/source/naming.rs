// 生成名: "*" + GUID 形式のトークン
//
// Bitmaps have no caller-meaningful name, so each one gets a synthetic name
// such as `*{3f2a9c1e-07b4-5d6e-8a90-1b2c3d4e5f60}`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};

/// 生成名の先頭文字。
pub const SYNTHETIC_NAME_PREFIX: char = '*';

static NAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// プロセス内で一意なトークンを生成する。
///
/// ハッシュ入力: `process_id || counter || timestamp_nanos`
/// カウンタにより同一プロセス内の重複を防ぎ、PIDと時刻でプロセス間の衝突を避ける。
fn unique_token() -> String {
    let counter = NAME_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(std::process::id().to_le_bytes());
    hasher.update(counter.to_le_bytes());
    hasher.update(nanos.to_le_bytes());
    let digest = hex::encode(&hasher.finalize()[..16]);

    format!(
        "{{{}-{}-{}-{}-{}}}",
        &digest[0..8],
        &digest[8..12],
        &digest[12..16],
        &digest[16..20],
        &digest[20..32]
    )
}

/// `*` で始まる一意な画像名を生成する。
pub fn synthetic_name() -> String {
    format!("{SYNTHETIC_NAME_PREFIX}{}", unique_token())
}

/// 生成名かどうかを判定する。
pub fn is_synthetic_name(name: &str) -> bool {
    name.starts_with(SYNTHETIC_NAME_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_synthetic_name_has_guid_shape() {
        let name = synthetic_name();
        assert!(is_synthetic_name(&name));
        // "*" + "{" + 32 hex + 4 dashes + "}"
        assert_eq!(name.len(), 1 + 1 + 32 + 4 + 1);
        assert!(name[1..].starts_with('{') && name.ends_with('}'));
        let groups: Vec<usize> = name[2..name.len() - 1].split('-').map(str::len).collect();
        assert_eq!(groups, vec![8, 4, 4, 4, 12]);
    }

    #[test]
    fn test_synthetic_names_do_not_repeat() {
        let names: HashSet<String> = (0..1000).map(|_| synthetic_name()).collect();
        assert_eq!(names.len(), 1000);
    }
}
