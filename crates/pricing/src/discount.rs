use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use foodflow_core::{DomainError, DomainResult, Money};

/// How a promotion reduces the item subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DiscountRule {
    /// Fraction of the subtotal in `[0, 1]` (0.10 is 10% off).
    Percentage(Decimal),
    /// Fixed amount off, capped at the subtotal.
    FixedAmount(Decimal),
}

impl DiscountRule {
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            DiscountRule::Percentage(p) if *p < Decimal::ZERO || *p > Decimal::ONE => Err(
                DomainError::invalid_discount(format!("percentage {p} is outside [0, 1]")),
            ),
            DiscountRule::FixedAmount(a) if *a < Decimal::ZERO => Err(
                DomainError::invalid_discount(format!("fixed amount {a} is negative")),
            ),
            _ => Ok(()),
        }
    }

    /// Discount (unrounded) for an exact subtotal; never exceeds the subtotal.
    pub fn amount_off(&self, subtotal: Money) -> DomainResult<Money> {
        self.validate()?;
        let raw = match self {
            DiscountRule::Percentage(p) => subtotal
                .amount()
                .checked_mul(*p)
                .ok_or_else(|| DomainError::invariant("discount overflow"))?,
            DiscountRule::FixedAmount(a) => *a,
        };
        Ok(Money::new(raw)?.min(subtotal))
    }
}

/// A promo code and the rule it unlocks.
///
/// The code is always stored normalized (trimmed, upper case) and the rule is
/// always valid; deserialization goes through [`Promotion::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Promotion {
    code: String,
    rule: DiscountRule,
}

impl Promotion {
    pub fn new(code: impl Into<String>, rule: DiscountRule) -> DomainResult<Self> {
        let code = normalize_code(&code.into());
        if code.is_empty() {
            return Err(DomainError::validation("promo code must not be empty"));
        }
        rule.validate()?;
        Ok(Self { code, rule })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn rule(&self) -> &DiscountRule {
        &self.rule
    }
}

impl<'de> Deserialize<'de> for Promotion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            code: String,
            rule: DiscountRule,
        }

        let raw = Raw::deserialize(deserializer)?;
        Promotion::new(raw.code, raw.rule).map_err(serde::de::Error::custom)
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// The set of promo codes a storefront accepts.
///
/// Lookups ignore case and surrounding whitespace, matching how customers
/// type codes into the checkout form. Serialized as a list of promotions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Promotion>", into = "Vec<Promotion>")]
pub struct PromoBook {
    promotions: BTreeMap<String, Promotion>,
}

impl PromoBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, promotion: Promotion) -> Self {
        self.insert(promotion);
        self
    }

    /// Insert or replace the promotion for its code.
    pub fn insert(&mut self, promotion: Promotion) {
        self.promotions.insert(normalize_code(&promotion.code), promotion);
    }

    pub fn len(&self) -> usize {
        self.promotions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.promotions.is_empty()
    }

    /// Resolve the promo-code form field.
    ///
    /// A blank field means "no promotion"; a non-blank unknown code is an
    /// error so it can be surfaced to the customer instead of silently ignored.
    pub fn resolve(&self, code: Option<&str>) -> DomainResult<Option<&Promotion>> {
        let Some(raw) = code else {
            return Ok(None);
        };
        let key = normalize_code(raw);
        if key.is_empty() {
            return Ok(None);
        }
        self.promotions
            .get(&key)
            .map(Some)
            .ok_or(DomainError::UnknownPromoCode(key))
    }
}

impl From<Vec<Promotion>> for PromoBook {
    fn from(promotions: Vec<Promotion>) -> Self {
        promotions.into_iter().collect()
    }
}

impl From<PromoBook> for Vec<Promotion> {
    fn from(book: PromoBook) -> Self {
        book.promotions.into_values().collect()
    }
}

impl FromIterator<Promotion> for PromoBook {
    fn from_iter<T: IntoIterator<Item = Promotion>>(iter: T) -> Self {
        let mut book = PromoBook::new();
        for promotion in iter {
            book.insert(promotion);
        }
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> PromoBook {
        let save10 = DiscountRule::Percentage(Decimal::new(10, 2));
        let five_off = DiscountRule::FixedAmount(Decimal::new(500, 2));
        PromoBook::new()
            .with(Promotion::new("save10", save10).unwrap())
            .with(Promotion::new("FIVEOFF", five_off).unwrap())
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let book = book();
        let promo = book.resolve(Some("  Save10 ")).unwrap().unwrap();
        assert_eq!(promo.code(), "SAVE10");
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn blank_code_means_no_promotion() {
        let book = book();
        assert_eq!(book.resolve(None).unwrap(), None);
        assert_eq!(book.resolve(Some("   ")).unwrap(), None);
    }

    #[test]
    fn unknown_code_is_an_error() {
        let err = book().resolve(Some("free-food")).unwrap_err();
        assert_eq!(err, DomainError::UnknownPromoCode("FREE-FOOD".to_string()));
    }

    #[test]
    fn fixed_discount_is_capped_at_subtotal() {
        let rule = DiscountRule::FixedAmount(Decimal::new(500, 2));
        let off = rule.amount_off(Money::from_cents(300)).unwrap();
        assert_eq!(off, Money::from_cents(300));
    }

    #[test]
    fn invalid_rules_are_rejected() {
        assert!(matches!(
            Promotion::new("X", DiscountRule::Percentage(Decimal::new(150, 2))),
            Err(DomainError::InvalidDiscount(_))
        ));
        assert!(matches!(
            Promotion::new("X", DiscountRule::FixedAmount(Decimal::new(-1, 0))),
            Err(DomainError::InvalidDiscount(_))
        ));
        assert!(matches!(
            Promotion::new(" ", DiscountRule::FixedAmount(Decimal::ONE)),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn promotions_loaded_from_json_are_normalized() {
        let book: PromoBook = serde_json::from_str(
            r#"[{"code":" save10 ","rule":{"kind":"percentage","value":"0.10"}}]"#,
        )
        .unwrap();
        let promo = book.resolve(Some("save10")).unwrap().unwrap();
        assert_eq!(promo.code(), "SAVE10");
        assert_eq!(promo.rule(), &DiscountRule::Percentage(Decimal::new(10, 2)));

        let json = serde_json::to_string(&book).unwrap();
        let back: PromoBook = serde_json::from_str(&json).unwrap();
        assert_eq!(back, book);
    }

    #[test]
    fn invalid_promotions_are_rejected_when_loaded() {
        let too_big = r#"{"code":"HALF","rule":{"kind":"percentage","value":"5"}}"#;
        assert!(serde_json::from_str::<Promotion>(too_big).is_err());

        let blank = r#"{"code":"  ","rule":{"kind":"fixed_amount","value":"1"}}"#;
        assert!(serde_json::from_str::<Promotion>(blank).is_err());
    }
}
