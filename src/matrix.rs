use crate::algorithm::{HashFamily, HashVariant};

/// SUPPORT is the validity matrix: rows follow `HashFamily::ALL`, columns follow `HashVariant::ALL`.
/// MD5 has no managed implementation.
const SUPPORT: [[bool; 4]; 5] = [
    // Normal, Cng,  Managed, CryptoServiceProvider
    [true, true, false, true], // MD5
    [true, true, true, true],  // SHA1
    [true, true, true, true],  // SHA256
    [true, true, true, true],  // SHA384
    [true, true, true, true],  // SHA512
];

/// is_supported reports whether `family` can be computed by `variant`.
pub const fn is_supported(family: HashFamily, variant: HashVariant) -> bool {
    SUPPORT[family.index()][variant.index()]
}

/// supported_variants lists the variants available for `family`, in column order.
pub fn supported_variants(family: HashFamily) -> impl Iterator<Item = HashVariant> {
    HashVariant::ALL
        .into_iter()
        .filter(move |v| is_supported(family, *v))
}

/// supported_combinations lists every valid (family, variant) pair, row by row.
pub fn supported_combinations() -> impl Iterator<Item = (HashFamily, HashVariant)> {
    HashFamily::ALL
        .into_iter()
        .flat_map(|f| supported_variants(f).map(move |v| (f, v)))
}
