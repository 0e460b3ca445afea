//! Evaluation strategies and the regime dispatcher
//!
//! This module contains the numerical machinery, organized by layer:
//!
//! - `series` - pFq term generators and summation drivers
//! - `recurrence` - three-term recurrence engine and coefficients
//! - `gamma` / `bessel` - log-gamma and cylinder Bessel J building blocks
//! - `asymptotic`, `bessel_series`, `rational`, `ratios`, `large_abz` -
//!   the specialized evaluators
//! - `dispatch` - the predicate cascade routing (a, b, z) to a method
//!
//! # Academic References
//!
//! - **DLMF**: NIST Digital Library of Mathematical Functions,
//!   chapter 13 <https://dlmf.nist.gov/13>
//! - **A&S**: Abramowitz & Stegun, "Handbook of Mathematical
//!   Functions" (1964), §13.3-13.6
//! - **NR**: Press et al., "Numerical Recipes" (3rd ed., 2007), §6.7
//! - Gautschi (1967) "Computational Aspects of Three-Term Recurrence
//!   Relations", SIAM Review 9
//! - Tricomi (1954) "Funzioni ipergeometriche confluenti"

pub(crate) mod asymptotic;
pub(crate) mod bessel;
pub(crate) mod bessel_series;
pub(crate) mod dispatch;
pub(crate) mod gamma;
pub(crate) mod large_abz;
pub(crate) mod rational;
pub(crate) mod ratios;
pub(crate) mod recurrence;
pub(crate) mod series;
