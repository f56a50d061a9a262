use std::marker::PhantomData;

use digest::{Digest, DynDigest, Output};
use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::algorithm::{HashFamily, HashVariant};
use crate::error::{HashError, Result};
use crate::matrix;

/// DigestStrategy is one way of computing a family's digest over a complete message.
/// Every strategy for a given family must return the same bytes.
pub trait DigestStrategy: Send + Sync {
    /// compute_digest hashes `data` in one pass and returns exactly `output_len()` bytes.
    fn compute_digest(&self, data: &[u8]) -> Vec<u8>;
    /// output_len returns the digest size in bytes.
    fn output_len(&self) -> usize;
}

/// OneShot hashes through the `Digest::digest` convenience function.
pub struct OneShot<D> {
    _digest: PhantomData<fn() -> D>,
}

impl<D> OneShot<D> {
    /// new returns a one-shot strategy for `D`.
    pub fn new() -> Self {
        OneShot {
            _digest: PhantomData,
        }
    }
}

impl<D> Default for OneShot<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest> DigestStrategy for OneShot<D> {
    fn compute_digest(&self, data: &[u8]) -> Vec<u8> {
        D::digest(data).to_vec()
    }

    fn output_len(&self) -> usize {
        <D as Digest>::output_size()
    }
}

/// Incremental builds a fresh context per call and finalizes into a stack buffer.
pub struct Incremental<D> {
    _digest: PhantomData<fn() -> D>,
}

impl<D> Incremental<D> {
    /// new returns an incremental strategy for `D`.
    pub fn new() -> Self {
        Incremental {
            _digest: PhantomData,
        }
    }
}

impl<D> Default for Incremental<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest> DigestStrategy for Incremental<D> {
    fn compute_digest(&self, data: &[u8]) -> Vec<u8> {
        let mut hasher = <D as Digest>::new();
        Digest::update(&mut hasher, data);

        let mut out = Output::<D>::default();
        Digest::finalize_into(hasher, &mut out);
        out.to_vec()
    }

    fn output_len(&self) -> usize {
        <D as Digest>::output_size()
    }
}

/// Prototype keeps an initialized context and hashes on a copy of it,
/// so the template itself is never written to.
pub struct Prototype<D> {
    template: D,
}

impl<D: Digest + Clone> Prototype<D> {
    /// new wraps `template` as the context every call starts from.
    pub fn new(template: D) -> Self {
        Prototype { template }
    }
}

impl<D: Digest + Clone + Send + Sync> DigestStrategy for Prototype<D> {
    fn compute_digest(&self, data: &[u8]) -> Vec<u8> {
        let mut hasher = self.template.clone();
        Digest::update(&mut hasher, data);
        Digest::finalize(hasher).to_vec()
    }

    fn output_len(&self) -> usize {
        <D as Digest>::output_size()
    }
}

/// Dynamic hashes through a boxed, runtime-dispatched context produced by `factory`.
pub struct Dynamic {
    factory: fn() -> Box<dyn DynDigest>,
}

impl Dynamic {
    /// new returns a strategy that calls `factory` once per digest.
    pub fn new(factory: fn() -> Box<dyn DynDigest>) -> Self {
        Dynamic { factory }
    }
}

impl DigestStrategy for Dynamic {
    fn compute_digest(&self, data: &[u8]) -> Vec<u8> {
        let mut hasher = (self.factory)();
        hasher.update(data);
        hasher.finalize().into_vec()
    }

    fn output_len(&self) -> usize {
        (self.factory)().output_size()
    }
}

fn boxed<D: DynDigest + Default + 'static>() -> Box<dyn DynDigest> {
    Box::<D>::default()
}

type StrategyTable = [[Option<Box<dyn DigestStrategy>>; 4]; 5];

// Rows follow HashFamily::ALL, columns follow HashVariant::ALL, same as the validity matrix.
static STRATEGIES: Lazy<StrategyTable> = Lazy::new(|| {
    HashFamily::ALL.map(|family| HashVariant::ALL.map(|variant| build(family, variant)))
});

fn build(family: HashFamily, variant: HashVariant) -> Option<Box<dyn DigestStrategy>> {
    if !matrix::is_supported(family, variant) {
        return None;
    }

    let strategy = match family {
        HashFamily::Md5 => for_variant::<md5::Md5>(variant),
        HashFamily::Sha1 => for_variant::<sha1::Sha1>(variant),
        HashFamily::Sha256 => for_variant::<sha2::Sha256>(variant),
        HashFamily::Sha384 => for_variant::<sha2::Sha384>(variant),
        HashFamily::Sha512 => for_variant::<sha2::Sha512>(variant),
    };
    Some(strategy)
}

fn for_variant<D>(variant: HashVariant) -> Box<dyn DigestStrategy>
where
    D: Digest + DynDigest + Clone + Default + Send + Sync + 'static,
{
    match variant {
        HashVariant::Normal => Box::new(OneShot::<D>::new()),
        HashVariant::Cng => Box::new(Incremental::<D>::new()),
        HashVariant::Managed => Box::new(Dynamic::new(boxed::<D>)),
        HashVariant::CryptoServiceProvider => Box::new(Prototype::new(D::default())),
    }
}

/// resolve returns the strategy registered for `(family, variant)`.
/// Unsupported pairs are rejected from the validity matrix before any strategy is touched.
pub fn resolve(family: HashFamily, variant: HashVariant) -> Result<&'static dyn DigestStrategy> {
    if !matrix::is_supported(family, variant) {
        debug!(%family, %variant, "rejected unsupported hash combination");
        return Err(HashError::UnsupportedCombination { family, variant });
    }

    let table: &'static StrategyTable = &STRATEGIES;
    let strategy = table[family.index()][variant.index()]
        .as_deref()
        .ok_or(HashError::UnsupportedCombination { family, variant })?;

    trace!(%family, %variant, output_len = strategy.output_len(), "resolved digest strategy");
    Ok(strategy)
}

#[cfg(test)]
pub mod test {
    use std::io::Write;

    use super::*;
    use sha3::{
        digest::{ExtendableOutput, XofReader},
        Shake256,
    };

    fn supported() -> Vec<(HashFamily, HashVariant)> {
        matrix::supported_combinations().collect()
    }

    #[test]
    fn table_matches_matrix() {
        for family in HashFamily::ALL {
            for variant in HashVariant::ALL {
                assert_eq!(
                    STRATEGIES[family.index()][variant.index()].is_some(),
                    matrix::is_supported(family, variant),
                    "strategy table and validity matrix disagree on {} {}",
                    family,
                    variant
                );
            }
        }
    }

    #[test]
    fn output_lengths() {
        supported().into_iter().for_each(|(family, variant)| {
            let s = resolve(family, variant).unwrap();
            assert_eq!(s.output_len(), family.output_len(), "{} {}", family, variant);
            assert_eq!(
                s.compute_digest(b"length").len(),
                family.output_len(),
                "{} {}",
                family,
                variant
            );
        })
    }

    #[test]
    fn md5_managed_rejected() {
        assert_eq!(
            resolve(HashFamily::Md5, HashVariant::Managed).err(),
            Some(HashError::UnsupportedCombination {
                family: HashFamily::Md5,
                variant: HashVariant::Managed,
            })
        );
    }

    #[test]
    fn strategies_agree() {
        for family in HashFamily::ALL {
            let reference = resolve(family, HashVariant::Normal).unwrap();

            (0..200).for_each(|_| {
                let len = rand::random::<usize>() % 300;
                let msg: Vec<u8> = (0..len).map(|_| rand::random::<u8>()).collect();
                let want = reference.compute_digest(&msg);

                matrix::supported_variants(family).for_each(|variant| {
                    let got = resolve(family, variant).unwrap().compute_digest(&msg);
                    assert_eq!(
                        got,
                        want,
                        "{} {} differs from {} Normal",
                        family,
                        variant,
                        family
                    );
                });
            });
        }
    }

    #[test]
    fn strategies_agree_on_long_input() {
        let mut input = [0; 6000];
        let mut v = Shake256::default();
        v.write_all("texthash input".as_bytes()).unwrap();
        v.finalize_xof().read(&mut input);

        for family in HashFamily::ALL {
            let want = resolve(family, HashVariant::Normal)
                .unwrap()
                .compute_digest(&input);

            matrix::supported_variants(family).for_each(|variant| {
                let got = resolve(family, variant).unwrap().compute_digest(&input);
                assert_eq!(
                    hex::encode(&got),
                    hex::encode(&want),
                    "{} {} differs on 6000 byte input",
                    family,
                    variant
                );
            });
        }
    }

    #[test]
    fn prototype_template_is_not_consumed() {
        let s = Prototype::new(sha2::Sha256::new());
        let first = s.compute_digest(b"abc");
        let second = s.compute_digest(b"abc");
        assert_eq!(first, second);
        assert_eq!(
            hex::encode(first),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn dynamic_strategy() {
        let s = Dynamic::new(boxed::<sha1::Sha1>);
        assert_eq!(s.output_len(), 20);
        assert_eq!(
            hex::encode(s.compute_digest(b"abc")),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }
}
