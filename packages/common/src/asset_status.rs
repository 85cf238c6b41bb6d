use crate::choice::small_int_choice;

small_int_choice! {
    /// Operational status of an asset.
    pub enum AssetStatus {
        #[default]
        Online = 0, "online", "在线";
        Offline = 1, "offline", "下线";
        Unknown = 2, "unknown", "未知";
        Faulty = 3, "faulty", "故障";
        Standby = 4, "standby", "备用";
    }
}
