//! Category-specific refinements of [`AssetType`](crate::AssetType).

use crate::choice::small_int_choice;

small_int_choice! {
    /// Server hardware class.
    pub enum ServerType {
        #[default]
        PcServer = 0, "pc_server", "PC服务器";
        Blade = 1, "blade", "刀片机";
        Minicomputer = 2, "minicomputer", "小型机";
    }
}

small_int_choice! {
    pub enum SecurityDeviceType {
        #[default]
        Firewall = 0, "firewall", "防火墙";
        IntrusionDetection = 1, "intrusion_detection", "入侵检测设备";
        InternetGateway = 2, "internet_gateway", "互联网网关";
        OpsAudit = 3, "ops_audit", "运维审计系统";
    }
}

small_int_choice! {
    pub enum StorageDeviceType {
        #[default]
        DiskArray = 0, "disk_array", "磁盘阵列";
        NetworkStorage = 1, "network_storage", "网络存储器";
        TapeLibrary = 2, "tape_library", "磁带库";
        TapeDrive = 3, "tape_drive", "磁带机";
    }
}

small_int_choice! {
    pub enum NetworkDeviceType {
        #[default]
        Router = 0, "router", "路由器";
        Switch = 1, "switch", "交换机";
        LoadBalancer = 2, "load_balancer", "负载均衡";
        Vpn = 3, "vpn", "VPN设备";
    }
}

small_int_choice! {
    /// Licensed software category.
    pub enum SoftwareType {
        #[default]
        OperatingSystem = 0, "operating_system", "操作系统";
        OfficeDevelopment = 1, "office_development", "办公/开发软件";
        Business = 2, "business", "业务软件";
    }
}
