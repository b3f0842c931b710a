//! 订单号生成
//!
//! 格式: `ORD_<毫秒时间戳>_<6位随机十六进制>`, 对人类可读又带
//! 足够随机性避免同毫秒内碰撞, 数据库上仍有唯一索引兜底。

use uuid::Uuid;

/// 生成一个新的外部订单号
pub fn new_order_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("ORD_{millis}_{}", &suffix[..6])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn format_is_ord_millis_suffix() {
        let id = new_order_id();
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORD");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ids_are_unique_under_burst() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(new_order_id()));
        }
    }
}
