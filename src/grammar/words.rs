//! Closed word lists. Each list overrides the generic identifier rule by
//! exact, whole-word match; none of them is consulted for substrings.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Statement keywords tagged `keyword.control`.
pub const CONTROL_KEYWORDS: &[&str] = &["for", "in", "if", "else", "while", "break", "continue"];

/// Types that open a variable declaration at statement level.
pub const STORAGE_TYPES: &[&str] = &[
    "int",
    "real",
    "complex",
    "vector",
    "row_vector",
    "matrix",
    "complex_vector",
    "complex_row_vector",
    "complex_matrix",
    "unit_vector",
    "simplex",
    "ordered",
    "positive_ordered",
    "cov_matrix",
    "corr_matrix",
    "cholesky_factor_corr",
    "cholesky_factor_cov",
    "array",
];

/// Keywords that are only meaningful inside `<...>` constraints, and only
/// when followed by `=`.
pub const RANGE_KEYWORDS: &[&str] = &["lower", "upper", "offset", "multiplier"];

/// Words reserved by the C++ toolchain models are compiled with, plus the
/// words Stan reserves for itself without giving them meaning.
const RESERVED: &[&str] = &[
    // C++
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "case",
    "catch", "char", "char16_t", "char32_t", "class", "compl", "const", "constexpr",
    "const_cast", "decltype", "default", "delete", "do", "double", "dynamic_cast", "enum",
    "explicit", "export", "extern", "float", "friend", "goto", "inline", "long", "mutable",
    "namespace", "new", "noexcept", "not", "not_eq", "nullptr", "operator", "or", "or_eq",
    "private", "protected", "public", "register", "reinterpret_cast", "short", "signed",
    "sizeof", "static", "static_assert", "static_cast", "struct", "switch", "template", "this",
    "thread_local", "throw", "try", "typedef", "typeid", "typename", "union", "unsigned",
    "using", "virtual", "volatile", "wchar_t", "xor", "xor_eq",
    // Stan
    "var", "fvar", "repeat", "until", "then", "true", "false", "STAN_MAJOR", "STAN_MINOR",
    "STAN_PATCH", "STAN_MATH_MAJOR", "STAN_MATH_MINOR", "STAN_MATH_PATCH",
];

/// Functions that still parse but have been superseded.
const DEPRECATED_FUNCTIONS: &[&str] = &[
    "binomial_coefficient_log",
    "get_lp",
    "if_else",
    "increment_log_prob",
    "integrate_ode",
    "multiply_log",
    "cov_exp_quad",
];

const ODE_FUNCTIONS: &[&str] = &[
    "integrate_ode_rk45",
    "integrate_ode_bdf",
    "integrate_ode_adams",
    "ode_rk45",
    "ode_rk45_tol",
    "ode_bdf",
    "ode_bdf_tol",
    "ode_adams",
    "ode_adams_tol",
    "ode_ckrk",
    "ode_ckrk_tol",
    "ode_adjoint_tol_ctl",
];

const ALGEBRA_SOLVERS: &[&str] = &[
    "algebra_solver",
    "algebra_solver_newton",
    "solve_newton",
    "solve_newton_tol",
    "solve_powell",
    "solve_powell_tol",
];

const DISTRIBUTIONS: &[&str] = &[
    "bernoulli", "bernoulli_logit", "beta", "beta_binomial", "beta_proportion", "binomial",
    "binomial_logit", "categorical", "categorical_logit", "cauchy", "chi_square", "dirichlet",
    "discrete_range", "double_exponential", "exp_mod_normal", "exponential", "frechet", "gamma",
    "gaussian_dlm_obs", "gumbel", "hypergeometric", "inv_chi_square", "inv_gamma",
    "inv_wishart", "lkj_corr", "lkj_corr_cholesky", "logistic", "loglogistic", "lognormal",
    "multi_gp", "multi_gp_cholesky", "multi_normal", "multi_normal_cholesky",
    "multi_normal_prec", "multi_student_t", "multinomial", "multinomial_logit", "neg_binomial",
    "neg_binomial_2", "neg_binomial_2_log", "neg_binomial_2_log_glm", "normal", "normal_id_glm",
    "ordered_logistic", "ordered_probit", "pareto", "pareto_type_2", "poisson", "poisson_log",
    "poisson_log_glm", "rayleigh", "scaled_inv_chi_square", "skew_double_exponential",
    "skew_normal", "std_normal", "student_t", "uniform", "von_mises", "weibull", "wiener",
    "wishart",
];

/// Suffixes that turn a distribution name into a density function callable
/// from a `target +=` statement.
const DENSITY_SUFFIXES: &[&str] = &["_lpdf", "_lpmf", "_lcdf", "_lccdf", "_lupdf", "_lupmf"];

/// Suffixes that turn a distribution name into a deprecated density.
const DEPRECATED_SUFFIXES: &[&str] = &["_cdf_log", "_ccdf_log", "_log"];

const FUNCTIONS: &[&str] = &[
    "abs", "acos", "acosh", "add_diag", "append_array", "append_col", "append_row", "asin",
    "asinh", "atan", "atan2", "atanh", "bessel_first_kind", "bessel_second_kind", "beta",
    "block", "cbrt", "ceil", "chol2inv", "cholesky_decompose", "choose", "col", "cols",
    "columns_dot_product", "columns_dot_self", "cos", "cosh", "cov_exp_quad", "crossprod",
    "csr_extract_u", "csr_extract_v", "csr_extract_w", "csr_matrix_times_vector",
    "csr_to_dense_matrix", "cumulative_sum", "determinant", "diag_matrix", "diag_post_multiply",
    "diag_pre_multiply", "diagonal", "digamma", "dims", "distance", "dot_product", "dot_self",
    "e", "eigenvalues_sym", "eigenvectors_sym", "erf", "erfc", "exp", "exp2", "expm1", "fabs",
    "falling_factorial", "fdim", "floor", "fma", "fmax", "fmin", "fmod", "gamma_p", "gamma_q",
    "head", "hypot", "identity_matrix", "inc_beta", "int_step", "inv", "inv_cloglog",
    "inv_logit", "inv_Phi", "inv_sqrt", "inv_square", "inverse", "inverse_spd", "is_inf",
    "is_nan", "lbeta", "lchoose", "lgamma", "linspaced_array", "linspaced_vector", "lmgamma",
    "lmultiply", "log", "log10", "log1m", "log1m_exp", "log1m_inv_logit", "log1p", "log1p_exp",
    "log2", "log_determinant", "log_diff_exp", "log_falling_factorial", "log_inv_logit",
    "log_inv_logit_diff", "log_mix", "log_modified_bessel_first_kind", "log_rising_factorial",
    "log_softmax", "log_sum_exp", "logical_and", "logical_eq", "logical_gt", "logical_gte",
    "logical_lt", "logical_lte", "logical_negation", "logical_neq", "logical_or", "logit",
    "machine_precision", "map_rect", "matrix_exp", "matrix_exp_multiply", "matrix_power",
    "max", "mdivide_left_spd", "mdivide_left_tri_low", "mdivide_right_spd",
    "mdivide_right_tri_low", "mean", "min", "modified_bessel_first_kind",
    "modified_bessel_second_kind", "multiply_lower_tri_self_transpose", "negative_infinity",
    "norm", "not_a_number", "num_elements", "one_hot_array", "one_hot_int_array",
    "one_hot_row_vector", "one_hot_vector", "ones_array", "ones_int_array", "ones_row_vector",
    "ones_vector", "owens_t", "Phi", "Phi_approx", "pi", "positive_infinity", "pow", "prod",
    "qr_Q", "qr_R", "qr_thin_Q", "qr_thin_R", "quad_form", "quad_form_diag", "quad_form_sym",
    "rank", "reduce_sum", "rep_array", "rep_matrix", "rep_row_vector", "rep_vector", "reverse",
    "rising_factorial", "round", "row", "rows", "rows_dot_product", "rows_dot_self",
    "scale_matrix_exp_multiply", "sd", "segment", "sin", "singular_values", "sinh", "size",
    "softmax", "sort_asc", "sort_desc", "sort_indices_asc", "sort_indices_desc", "sqrt",
    "sqrt2", "square", "squared_distance", "step", "sub_col", "sub_row", "sum", "svd_U",
    "svd_V", "tail", "tan", "tanh", "tcrossprod", "tgamma", "to_array_1d", "to_array_2d",
    "to_int", "to_matrix", "to_row_vector", "to_vector", "trace", "trace_gen_quad_form",
    "trace_quad_form", "trigamma", "trunc", "uniform_simplex", "variance", "zeros_array",
    "zeros_int_array", "zeros_row_vector", "zeros_vector",
];

static RESERVED_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| RESERVED.iter().cloned().collect());
static DEPRECATED_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| DEPRECATED_FUNCTIONS.iter().cloned().collect());
static ODE_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| ODE_FUNCTIONS.iter().cloned().collect());
static ALGEBRA_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ALGEBRA_SOLVERS.iter().cloned().collect());
static DISTRIBUTION_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| DISTRIBUTIONS.iter().cloned().collect());
static FUNCTION_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| FUNCTIONS.iter().cloned().collect());

/// How a built-in (non-keyword) name should be tagged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    Deprecated,
    Ode,
    AlgebraSolver,
    Function,
}

pub fn is_control_keyword(word: &str) -> bool {
    CONTROL_KEYWORDS.contains(&word)
}

pub fn is_storage_type(word: &str) -> bool {
    STORAGE_TYPES.contains(&word)
}

pub fn is_range_keyword(word: &str) -> bool {
    RANGE_KEYWORDS.contains(&word)
}

pub fn is_reserved(word: &str) -> bool {
    RESERVED_SET.contains(word)
}

pub fn is_distribution(word: &str) -> bool {
    DISTRIBUTION_SET.contains(word)
}

/// Words the grammar gives a meaning of their own, which therefore can't
/// fill a name slot in a declaration.
pub fn is_keyword(word: &str) -> bool {
    is_control_keyword(word)
        || is_storage_type(word)
        || matches!(word, "void" | "return" | "print" | "reject" | "target")
}

/// A distribution's density spelled for `target +=`, e.g. `normal_lpdf`.
pub fn is_density(word: &str) -> bool {
    DENSITY_SUFFIXES.iter().any(|suffix| {
        word.strip_suffix(suffix)
            .map_or(false, is_distribution)
    })
}

/// Deprecated function lookup: the closed list plus the retired
/// `<distribution>_log` family of density spellings.
pub fn is_deprecated(word: &str) -> bool {
    if DEPRECATED_SET.contains(word) {
        return true;
    }

    // poisson_log and friends are distributions in their own right.
    !is_distribution(word)
        && DEPRECATED_SUFFIXES.iter().any(|suffix| {
            word.strip_suffix(suffix)
                .map_or(false, is_distribution)
        })
}

/// Classifies built-in functions. Deprecation wins over every other family.
pub fn builtin(word: &str) -> Option<Builtin> {
    if is_deprecated(word) {
        Some(Builtin::Deprecated)
    } else if ODE_SET.contains(word) {
        Some(Builtin::Ode)
    } else if ALGEBRA_SET.contains(word) {
        Some(Builtin::AlgebraSolver)
    } else if FUNCTION_SET.contains(word) {
        Some(Builtin::Function)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lists_do_not_overlap_reserved_words() {
        for word in CONTROL_KEYWORDS.iter().chain(STORAGE_TYPES) {
            assert!(!is_reserved(word), "{} is both a keyword and reserved", word);
        }
    }

    #[test]
    fn density_requires_a_known_distribution() {
        assert!(is_density("normal_lpdf"));
        assert!(is_density("poisson_log_lpmf"));
        assert!(!is_density("foo_lpdf"));
        assert!(!is_density("normal"));
    }

    #[test]
    fn deprecated_covers_retired_density_spellings() {
        assert!(is_deprecated("normal_log"));
        assert!(is_deprecated("normal_cdf_log"));
        assert!(is_deprecated("increment_log_prob"));
        assert!(!is_deprecated("log"));
        assert!(!is_deprecated("poisson_log"));
        assert!(is_deprecated("poisson_log_log"));
        assert!(!is_deprecated("normal_lpdf"));
    }

    #[test]
    fn builtin_prefers_deprecation() {
        assert_eq!(builtin("integrate_ode"), Some(Builtin::Deprecated));
        assert_eq!(builtin("integrate_ode_rk45"), Some(Builtin::Ode));
        assert_eq!(builtin("algebra_solver"), Some(Builtin::AlgebraSolver));
        assert_eq!(builtin("exp"), Some(Builtin::Function));
        assert_eq!(builtin("foo"), None);
    }
}
