use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::domain::merchant::{NewMerchant, RiskLevel};
use crate::domain::money;
use crate::domain::payment_method::{NewPaymentMethod, PaymentMethodType};
use crate::domain::transaction::{NewTransaction, TransactionStatus};
use crate::repo::store::Storage;

/// Demo catalogue for a fresh dashboard: four payment methods (two
/// disabled), two merchants and a handful of historical transactions.
pub async fn seed_demo_data(store: &dyn Storage) -> anyhow::Result<()> {
    let methods = [
        (
            "EcoCash",
            PaymentMethodType::MobileMoney,
            "Mobile money payments",
            "mobile-alt",
            true,
            serde_json::json!({"provider": "econet"}),
        ),
        (
            "Visa/MasterCard",
            PaymentMethodType::Card,
            "Card payments",
            "credit-card",
            true,
            serde_json::json!({"acceptedCards": ["visa", "mastercard"]}),
        ),
        (
            "OneWallet",
            PaymentMethodType::DigitalWallet,
            "Digital wallet",
            "wallet",
            false,
            serde_json::json!({"provider": "onewallet"}),
        ),
        (
            "Telecash",
            PaymentMethodType::MobileMoney,
            "Mobile money",
            "mobile-alt",
            false,
            serde_json::json!({"provider": "telecel"}),
        ),
    ];

    let mut method_ids = Vec::new();
    for (name, method_type, description, icon, is_active, config) in methods {
        let m = store
            .create_payment_method(NewPaymentMethod {
                name: name.to_string(),
                method_type,
                description: Some(description.to_string()),
                icon: icon.to_string(),
                is_active,
                fee_percent: Some(Decimal::new(25, 1)),
                config: Some(config),
            })
            .await?;
        method_ids.push(m.id);
    }

    let merchants = [
        (
            "John Doe",
            "john@example.com",
            "0771234567",
            "Tech Solutions Ltd",
            "Technology",
            "https://example.com/webhook",
        ),
        (
            "Jane Smith",
            "jane@retail.com",
            "0772345678",
            "Retail Plus",
            "Retail",
            "https://retail.com/webhook",
        ),
    ];

    let mut merchant_ids = Vec::new();
    for (name, email, phone, business_name, business_type, webhook_url) in merchants {
        let m = store
            .create_merchant(NewMerchant {
                name: name.to_string(),
                email: email.to_string(),
                phone: Some(phone.to_string()),
                business_name: business_name.to_string(),
                business_type: Some(business_type.to_string()),
                business_registration_number: None,
                tax_number: None,
                bank_account: None,
                webhook_url: Some(webhook_url.to_string()),
                is_active: true,
                risk_level: RiskLevel::Low,
            })
            .await?;
        merchant_ids.push(m.id);
    }

    let now = Utc::now();
    let history = [
        ("TXN001234", 0, 0, 12550, TransactionStatus::Success, "Product purchase", 2),
        ("TXN001235", 0, 1, 8999, TransactionStatus::Pending, "Service payment", 3),
        ("TXN001236", 1, 2, 4500, TransactionStatus::Failed, "Subscription payment", 5),
        ("TXN001237", 1, 1, 19999, TransactionStatus::Success, "Product bundle", 6),
    ];

    for (reference, merchant_idx, method_idx, cents, status, description, hours_ago) in history {
        let amount = Decimal::new(cents, 2);
        store
            .create_transaction(NewTransaction {
                transaction_id: reference.to_string(),
                merchant_id: merchant_ids[merchant_idx],
                payment_method_id: method_ids[method_idx],
                amount,
                fees: money::fee_for(amount, Decimal::new(25, 1))?,
                currency: "USD".to_string(),
                status,
                customer_email: None,
                customer_phone: None,
                description: Some(description.to_string()),
                metadata: None,
                created_at: Some(now - Duration::hours(hours_ago)),
            })
            .await?;
    }

    tracing::info!(
        payment_methods = method_ids.len(),
        merchants = merchant_ids.len(),
        "seeded demo data"
    );
    Ok(())
}
