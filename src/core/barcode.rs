use crate::domain::model::{BarcodeFormat, BarcodeScan};
use crate::utils::error::{ImpactError, Result};

pub const MIN_BARCODE_LEN: usize = 3;

/// Strips whitespace and hyphens; rejects codes shorter than three characters.
pub fn normalize(barcode_data: &str) -> Result<String> {
    let code: String = barcode_data
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if code.chars().count() < MIN_BARCODE_LEN {
        return Err(ImpactError::invalid_input(
            "barcode",
            barcode_data,
            format!("Barcode must have at least {} characters", MIN_BARCODE_LEN),
        ));
    }
    Ok(code)
}

/// All-digit codes of length 8, 12 or 13 are treated as EAN-8, UPC-A and
/// EAN-13 and must carry a valid check digit. Anything else is `Other`.
pub fn classify(code: &str) -> Result<BarcodeFormat> {
    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Ok(BarcodeFormat::Other);
    }

    let format = match code.len() {
        8 => BarcodeFormat::Ean8,
        12 => BarcodeFormat::UpcA,
        13 => BarcodeFormat::Ean13,
        _ => return Ok(BarcodeFormat::Other),
    };

    let digits: Vec<u32> = code.chars().filter_map(|c| c.to_digit(10)).collect();
    if !has_valid_check_digit(&digits) {
        return Err(ImpactError::invalid_input(
            "barcode",
            code,
            "Check digit does not match; the code may have been mistyped",
        ));
    }
    Ok(format)
}

/// GS1 mod-10: payload digits weighted 3,1,3,... starting from the right.
pub fn has_valid_check_digit(digits: &[u32]) -> bool {
    let Some((check, payload)) = digits.split_last() else {
        return false;
    };
    let sum: u32 = payload
        .iter()
        .rev()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { d * 3 } else { *d })
        .sum();
    (10 - sum % 10) % 10 == *check
}

// Number system 2 (UPC-A) and prefixes 20-29 (EAN-13) are assigned in store,
// typically to items weighed at the counter.
fn is_variable_measure(code: &str, format: BarcodeFormat) -> bool {
    match format {
        BarcodeFormat::UpcA => code.starts_with('2'),
        BarcodeFormat::Ean13 => code.starts_with('2') || code.starts_with("02"),
        _ => false,
    }
}

/// Suggestions produced without a model, in the same shape as the
/// generated ones.
pub fn scan_offline(barcode_data: &str) -> Result<(BarcodeFormat, BarcodeScan)> {
    let code = normalize(barcode_data)?;
    let format = classify(&code)?;
    tracing::debug!("Barcode {} classified as {:?}", code, format);

    let scan = if is_variable_measure(&code, format) {
        BarcodeScan {
            product_name: format!("Fresh counter item {}", code),
            usage_suggestions: "Plan to eat it within a day or two: cook it tonight, or portion and freeze what you won't use.".to_string(),
            storage_suggestions: "Keep refrigerated at or below 4°C (40°F) in its wrapping on the bottom shelf. Freeze within 1-2 days for longer storage.".to_string(),
        }
    } else {
        let label = match format {
            BarcodeFormat::Other => "Scanned item",
            _ => "Packaged food",
        };
        BarcodeScan {
            product_name: format!("{} {}", label, code),
            usage_suggestions: "Use it before the date on the pack. Once opened, work it into your next few meals or share what you can't finish.".to_string(),
            storage_suggestions: "Store unopened in a cool, dry place away from sunlight. After opening, reseal or move it to an airtight container and refrigerate if the label says so.".to_string(),
        }
    };

    Ok((format, scan))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(code: &str) -> Vec<u32> {
        code.chars().filter_map(|c| c.to_digit(10)).collect()
    }

    #[test]
    fn test_check_digits() {
        assert!(has_valid_check_digit(&digits("4006381333931")));
        assert!(has_valid_check_digit(&digits("036000291452")));
        assert!(has_valid_check_digit(&digits("96385074")));
        assert!(!has_valid_check_digit(&digits("4006381333932")));
        assert!(!has_valid_check_digit(&[]));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("4006381333931").unwrap(), BarcodeFormat::Ean13);
        assert_eq!(classify("036000291452").unwrap(), BarcodeFormat::UpcA);
        assert_eq!(classify("96385074").unwrap(), BarcodeFormat::Ean8);
        assert_eq!(classify("12345").unwrap(), BarcodeFormat::Other);
        assert_eq!(classify("ABC123").unwrap(), BarcodeFormat::Other);
    }

    #[test]
    fn test_bad_check_digit_rejected() {
        let err = scan_offline("4006381333932").unwrap_err();
        assert!(matches!(err, ImpactError::InvalidInput { ref field, .. } if field == "barcode"));
    }

    #[test]
    fn test_short_code_rejected() {
        for bad in ["", "12", " 1-2 "] {
            let err = scan_offline(bad).unwrap_err();
            assert!(matches!(err, ImpactError::InvalidInput { ref field, .. } if field == "barcode"));
        }
    }

    #[test]
    fn test_packaged_product() {
        let (format, scan) = scan_offline("4006 3813 3393 1").unwrap();
        assert_eq!(format, BarcodeFormat::Ean13);
        assert_eq!(scan.product_name, "Packaged food 4006381333931");
        assert!(!scan.usage_suggestions.is_empty());
        assert!(scan.storage_suggestions.contains("airtight"));
    }

    #[test]
    fn test_variable_measure_items_get_fresh_advice() {
        let (format, scan) = scan_offline("212345678909").unwrap();
        assert_eq!(format, BarcodeFormat::UpcA);
        assert!(scan.product_name.starts_with("Fresh counter item"));
        assert!(scan.storage_suggestions.contains("refrigerated"));

        let (format, scan) = scan_offline("2012345000001").unwrap();
        assert_eq!(format, BarcodeFormat::Ean13);
        assert!(scan.product_name.starts_with("Fresh counter item"));
    }

    #[test]
    fn test_free_text_code() {
        let (format, scan) = scan_offline("QR-abc").unwrap();
        assert_eq!(format, BarcodeFormat::Other);
        assert_eq!(scan.product_name, "Scanned item QRabc");
    }

    #[test]
    fn test_output_field_names() {
        let (_, scan) = scan_offline("96385074").unwrap();
        let json = serde_json::to_value(&scan).unwrap();
        assert!(json.get("productName").is_some());
        assert!(json.get("usageSuggestions").is_some());
        assert!(json.get("storageSuggestions").is_some());
    }
}
