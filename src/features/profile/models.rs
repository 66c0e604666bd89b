use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::features::locker::models::UnlockedStyles;

/// 设备码登录的起始凭据，交给用户完成浏览器授权。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeviceCodeStart {
    /// 用户打开的完整验证地址
    pub verification_uri_complete: String,
    /// 轮询用的设备码
    pub device_code: String,
}

/// 已授权的账号会话。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EpicSession {
    pub access_token: String,
    pub account_id: String,
    #[serde(default, rename = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub expires_in: u64,
}

/// 从 athena 档案中提取的库存：饰品 id 列表 + 已解锁样式表。
#[derive(Debug, Clone, Default)]
pub struct AthenaInventory {
    pub items: Vec<String>,
    pub unlocked_styles: UnlockedStyles,
}

fn profile_items(profile: &Value) -> Option<&serde_json::Map<String, Value>> {
    profile
        .get("profileChanges")?
        .get(0)?
        .get("profile")?
        .get("items")?
        .as_object()
}

/// athena 档案 → 库存。
///
/// 模板 id 形如 `Athena{Type}:{id}`；加载界面的阵容条目不属于库存。
/// 样式表收集所有 Athena 模板上 `attributes.variants[].owned` 的 token。
pub fn extract_athena_inventory(profile: &Value) -> AthenaInventory {
    let mut inventory = AthenaInventory::default();
    let Some(items) = profile_items(profile) else {
        return inventory;
    };

    for entry in items.values() {
        let Some(template_id) = entry.get("templateId").and_then(Value::as_str) else {
            continue;
        };
        let tid_lower = template_id.to_ascii_lowercase();
        if !tid_lower.starts_with("athena") {
            continue;
        }
        let Some((_, id)) = tid_lower.split_once(':') else {
            continue;
        };

        let styles = inventory
            .unlocked_styles
            .entry(id.to_string())
            .or_default();
        if let Some(variants) = entry
            .get("attributes")
            .and_then(|a| a.get("variants"))
            .and_then(Value::as_array)
        {
            for variant in variants {
                if let Some(owned) = variant.get("owned").and_then(Value::as_array) {
                    styles.extend(owned.iter().filter_map(Value::as_str).map(String::from));
                }
            }
        }

        if tid_lower.contains("loadingscreen_character_lineup") {
            continue;
        }
        if id.contains('_') {
            inventory.items.push(id.to_string());
        }
    }
    inventory
}

/// common_core 档案 → 横幅裸 id 列表（`homebasebanner:*` / `homebasebannericon:*`）。
pub fn extract_banner_ids(profile: &Value) -> Vec<String> {
    let Some(items) = profile_items(profile) else {
        return Vec::new();
    };

    let mut result = Vec::new();
    for entry in items.values() {
        let Some(template_id) = entry.get("templateId").and_then(Value::as_str) else {
            continue;
        };
        let tid_lower = template_id.to_ascii_lowercase();
        if tid_lower.starts_with("homebasebanner:") || tid_lower.starts_with("homebasebannericon:")
        {
            if let Some((_, banner_id)) = tid_lower.split_once(':') {
                if !banner_id.is_empty() {
                    result.push(banner_id.to_string());
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile_with(items: Value) -> Value {
        json!({ "profileChanges": [{ "profile": { "items": items } }] })
    }

    #[test]
    fn athena_inventory_collects_ids_and_styles() {
        let profile = profile_with(json!({
            "slot1": {
                "templateId": "AthenaCharacter:CID_028_Athena_Commando_F",
                "attributes": { "variants": [ { "owned": ["Mat1", "Mat3"] } ] }
            },
            "slot2": { "templateId": "AthenaDance:EID_Floss" },
            "slot3": { "templateId": "Currency:MtxPurchased" },
            "slot4": { "templateId": "AthenaLoadingScreen:loadingscreen_character_lineup" }
        }));

        let inv = extract_athena_inventory(&profile);
        assert_eq!(inv.items.len(), 2);
        assert!(inv.items.contains(&"cid_028_athena_commando_f".to_string()));
        assert!(inv.items.contains(&"eid_floss".to_string()));
        assert_eq!(
            inv.unlocked_styles["cid_028_athena_commando_f"],
            vec!["Mat1", "Mat3"]
        );
    }

    #[test]
    fn banner_ids_come_from_both_template_kinds() {
        let profile = profile_with(json!({
            "a": { "templateId": "HomebaseBanner:OT1Banner" },
            "b": { "templateId": "HomebaseBannerIcon:InfluencerBanner21" },
            "c": { "templateId": "Currency:MtxPurchased" }
        }));

        let mut ids = extract_banner_ids(&profile);
        ids.sort();
        assert_eq!(ids, vec!["influencerbanner21", "ot1banner"]);
    }

    #[test]
    fn malformed_profile_yields_empty() {
        let inv = extract_athena_inventory(&json!({}));
        assert!(inv.items.is_empty());
        assert!(extract_banner_ids(&json!({"profileChanges": []})).is_empty());
    }
}
