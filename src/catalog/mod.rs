//! ベンダーカタログ（静的フィクスチャデータ）
//!
//! ベンダー・KPIは起動時にコンパイル済み定数から構築され、実行中は不変。
//! `context_data` がAIエージェントへ渡される唯一の入力となる。

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// ベンダーID（一意キー）
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, Serialize, Deserialize)]
pub struct VendorId(pub String);

/// 契約ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VendorStatus {
    Active,
    AtRisk,
    RenewalDue,
}

impl VendorStatus {
    /// 表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            VendorStatus::Active => "Active",
            VendorStatus::AtRisk => "At Risk",
            VendorStatus::RenewalDue => "Renewal Due",
        }
    }
}

/// KPIステータス（カードの配色に使用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KpiStatus {
    Good,
    Warning,
    Danger,
    Neutral,
}

impl KpiStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KpiStatus::Good => "good",
            KpiStatus::Warning => "warning",
            KpiStatus::Danger => "danger",
            KpiStatus::Neutral => "neutral",
        }
    }
}

/// KPIアイコン種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KpiIcon {
    Chart,
    Shield,
    Dollar,
    File,
}

/// KPIレコード（所属ベンダーの一部として不変）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub id: String,
    pub label: String,
    pub value: String,
    pub status: KpiStatus,
    pub trend: Option<String>,
    pub icon: Option<KpiIcon>,
}

/// 月次支出ポイント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendPoint {
    pub month: String,
    pub amount: u32,
}

/// ベンダー（起動時ロード、以後ミューテーションなし）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    pub logo_initials: String,
    pub status: VendorStatus,
    pub contract_value: String,
    pub renewal_date: String,
    pub description: String,
    pub contract_file_name: String,
    /// AIエージェントへ供給する契約コンテキスト
    pub context_data: String,
    pub spend_data: Vec<SpendPoint>,
    pub kpis: Vec<Kpi>,
}

/// クイック入力用の定型プロンプト
pub const SUGGESTED_PROMPTS: &[&str] = &[
    "Summarize the current contract status.",
    "Are there any active risks or disputes?",
    "Draft a renewal notice email.",
    "Analyze the spending trend.",
];

static VENDORS: OnceLock<Vec<Vendor>> = OnceLock::new();

/// ベンダーカタログを取得（遅延初期化）
pub fn vendors() -> &'static [Vendor] {
    VENDORS.get_or_init(build_vendors)
}

/// IDでベンダーを検索
pub fn find_vendor(id: &str) -> Option<&'static Vendor> {
    vendors().iter().find(|v| v.id.0 == id)
}

fn spend(points: &[(&str, u32)]) -> Vec<SpendPoint> {
    points
        .iter()
        .map(|(month, amount)| SpendPoint {
            month: (*month).to_string(),
            amount: *amount,
        })
        .collect()
}

fn build_vendors() -> Vec<Vendor> {
    vec![
        Vendor {
            id: VendorId("honeywell".to_string()),
            name: "Honeywell".to_string(),
            logo_initials: "HW".to_string(),
            status: VendorStatus::Active,
            contract_value: "$2.4M / yr".to_string(),
            renewal_date: "Oct 15, 2025".to_string(),
            description: "Building automation systems and HVAC maintenance services."
                .to_string(),
            contract_file_name: "MSA-2023-HW-Signed.pdf".to_string(),
            context_data: "\
Vendor: Honeywell
Contract ID: MSA-2023-HW-001
Type: Master Services Agreement (Facilities)
Start Date: Oct 15, 2023
End Date: Oct 15, 2025
Annual Value: $2,400,000 USD
Payment Terms: Net 45
Active Disputes: None
SLA Performance: 98.5% (Target 99%)
Key Contact: Sarah Connor (Account Director)
Notes: Upcoming quarterly business review scheduled for next month. Focus on energy efficiency upgrades."
                .to_string(),
            spend_data: spend(&[
                ("Jan", 200),
                ("Feb", 210),
                ("Mar", 195),
                ("Apr", 200),
                ("May", 220),
                ("Jun", 200),
            ]),
            kpis: vec![
                Kpi {
                    id: "uptime".to_string(),
                    label: "Uptime SLA".to_string(),
                    value: "99.95%".to_string(),
                    status: KpiStatus::Good,
                    trend: Some("+0.05%".to_string()),
                    icon: Some(KpiIcon::Chart),
                },
                Kpi {
                    id: "reliability".to_string(),
                    label: "Reliability Matrix".to_string(),
                    value: "High".to_string(),
                    status: KpiStatus::Good,
                    trend: None,
                    icon: Some(KpiIcon::Shield),
                },
                Kpi {
                    id: "commercial".to_string(),
                    label: "Commercial Impact".to_string(),
                    value: "$2.4M".to_string(),
                    status: KpiStatus::Neutral,
                    trend: None,
                    icon: Some(KpiIcon::Dollar),
                },
                Kpi {
                    id: "changes".to_string(),
                    label: "Contract Changes".to_string(),
                    value: "0 Pending".to_string(),
                    status: KpiStatus::Good,
                    trend: None,
                    icon: Some(KpiIcon::File),
                },
            ],
        },
        Vendor {
            id: VendorId("sap".to_string()),
            name: "SAP".to_string(),
            logo_initials: "SAP".to_string(),
            status: VendorStatus::AtRisk,
            contract_value: "$5.8M / yr".to_string(),
            renewal_date: "Dec 31, 2024".to_string(),
            description: "Enterprise ERP software licensing and cloud services.".to_string(),
            contract_file_name: "ELA-2021-SAP-Final.pdf".to_string(),
            context_data: "\
Vendor: SAP
Contract ID: ELA-2021-SAP-992
Type: Enterprise License Agreement
Start Date: Jan 1, 2021
End Date: Dec 31, 2024
Annual Value: $5,800,000 USD
Payment Terms: Net 30
Active Disputes: 1 (Overage charges for Q1 2024)
SLA Performance: 99.99% (Target 99.9%)
Key Contact: Hans Gruber (Regional VP)
Notes: Renewal negotiation critical. Client looking to migrate 20% of workload to AWS. Contract creates lock-in clauses that need review."
                .to_string(),
            spend_data: spend(&[
                ("Jan", 480),
                ("Feb", 480),
                ("Mar", 550), // Q1超過請求によるスパイク
                ("Apr", 480),
                ("May", 480),
                ("Jun", 480),
            ]),
            kpis: vec![
                Kpi {
                    id: "uptime".to_string(),
                    label: "Uptime SLA".to_string(),
                    value: "98.2%".to_string(),
                    status: KpiStatus::Warning,
                    trend: Some("-1.2%".to_string()),
                    icon: Some(KpiIcon::Chart),
                },
                Kpi {
                    id: "reliability".to_string(),
                    label: "Reliability Matrix".to_string(),
                    value: "Medium".to_string(),
                    status: KpiStatus::Warning,
                    trend: None,
                    icon: Some(KpiIcon::Shield),
                },
                Kpi {
                    id: "commercial".to_string(),
                    label: "Commercial Impact".to_string(),
                    value: "$5.8M".to_string(),
                    status: KpiStatus::Danger,
                    trend: None,
                    icon: Some(KpiIcon::Dollar),
                },
                Kpi {
                    id: "changes".to_string(),
                    label: "Contract Changes".to_string(),
                    value: "2 Critical".to_string(),
                    status: KpiStatus::Danger,
                    trend: None,
                    icon: Some(KpiIcon::File),
                },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_ids_are_unique() {
        let mut ids: Vec<_> = vendors().iter().map(|v| v.id.0.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), vendors().len());
    }

    #[test]
    fn test_context_data_mentions_vendor_name() {
        for vendor in vendors() {
            assert!(
                vendor.context_data.contains(&vendor.name),
                "context_data of {} should mention the vendor name",
                vendor.id
            );
        }
    }

    #[test]
    fn test_every_vendor_has_four_kpis() {
        for vendor in vendors() {
            assert_eq!(vendor.kpis.len(), 4, "vendor {}", vendor.id);
            assert_eq!(vendor.spend_data.len(), 6, "vendor {}", vendor.id);
        }
    }

    #[test]
    fn test_find_vendor() {
        assert!(find_vendor("honeywell").is_some());
        assert!(find_vendor("sap").is_some());
        assert!(find_vendor("unknown").is_none());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(VendorStatus::Active.label(), "Active");
        assert_eq!(VendorStatus::AtRisk.label(), "At Risk");
        assert_eq!(VendorStatus::RenewalDue.label(), "Renewal Due");
    }
}
