//! Game locale tags to ISO 639-3 language codes.
//!
//! Covers the locales offered by Minecraft 1.19 and later. Joke languages
//! (`lol_us`, `enws`, `en_ud`) map to the language they are based on, and
//! regional variants without a code of their own (Andalusian, Valencian)
//! map to Spanish. Interslavic uses the private-use code `qis`.

/// Returns the ISO 639-3 code for a locale tag such as `en_us` or `pt-BR`.
///
/// Tags are matched case-insensitively and `-` is accepted in place of `_`.
/// Unknown tags yield `None`.
///
/// # Example
///
/// ```
/// use albatross::lang::language_code;
///
/// assert_eq!(language_code("de_DE"), Some("deu"));
/// assert_eq!(language_code("pt-br"), Some("por"));
/// assert_eq!(language_code("xx_yy"), None);
/// ```
#[must_use]
pub fn language_code(locale_tag: &str) -> Option<&'static str> {
    let tag = locale_tag.trim().to_ascii_lowercase().replace('-', "_");
    let code = match tag.as_str() {
        "af_za" => "afr",
        "ar_sa" => "ara",
        "ast_es" => "ast",
        "az_az" => "aze",
        "ba_ru" => "bak",
        "bar" | "de_at" => "bar",
        "be_by" => "bel",
        "bs_ba" => "bos",
        "br_fr" => "bre",
        "bg_bg" => "bul",
        "ca_es" => "cat",
        "cs_cz" => "ces",
        "kw_gb" => "cor",
        "cy_gb" => "cym",
        "da_dk" => "dan",
        "de_de" => "deu",
        "el_gr" => "ell",
        "en_au" | "en_ca" | "en_gb" | "en_nz" | "en_pt" | "en_ud" | "en_us" | "enp" | "enws"
        | "lol_us" => "eng",
        "eo_uy" => "epo",
        "et_ee" => "est",
        "eu_es" => "eus",
        "fo_fo" => "fao",
        "fa_ir" => "fas",
        "fil_ph" => "fil",
        "fi_fi" => "fin",
        "fr_ca" | "fr_fr" => "fra",
        "fy_nl" => "fry",
        "fur_it" => "fur",
        "gd_gb" => "gla",
        "ga_ie" => "gle",
        "gl_es" => "glg",
        "de_ch" => "gsw",
        "haw_us" => "haw",
        "he_il" => "heb",
        "hi_in" => "hin",
        "hr_hr" => "hrv",
        "hu_hu" => "hun",
        "hy_am" => "hye",
        "ig_ng" => "ibo",
        "io_en" => "ido",
        "id_id" => "ind",
        "is_is" => "isl",
        "it_it" => "ita",
        "jbo_en" => "jbo",
        "ja_jp" => "jpn",
        "kn_in" => "kan",
        "ka_ge" => "kat",
        "kk_kz" => "kaz",
        "ko_kr" => "kor",
        "ksh" => "ksh",
        "la_la" => "lat",
        "lv_lv" => "lav",
        "li_li" => "lim",
        "lt_lt" => "lit",
        "lmo" => "lmo",
        "lb_lu" => "ltz",
        "lzh" => "lzh",
        "mk_mk" => "mkd",
        "mt_mt" => "mlt",
        "mn_mn" => "mon",
        "nds_de" => "nds",
        "nl_be" | "nl_nl" => "nld",
        "nn_no" => "nno",
        "no_no" => "nob",
        "oc_fr" => "oci",
        "ovd" => "ovd",
        "pl_pl" => "pol",
        "pt_br" | "pt_pt" => "por",
        "brb" => "qbr",
        "isv" => "qis",
        "qya_aa" => "qya",
        "ro_ro" => "ron",
        "rpr" | "ru_ru" => "rus",
        "sk_sk" => "slk",
        "sl_si" => "slv",
        "se_no" => "sme",
        "so_so" => "som",
        "es_ar" | "es_cl" | "es_ec" | "es_es" | "es_mx" | "es_uy" | "es_ve" | "esan" | "val_es" => {
            "spa"
        }
        "sq_al" => "sqi",
        "sr_sp" => "srp",
        "sv_se" => "swe",
        "sxu" => "sxu",
        "szl" => "szl",
        "ta_in" => "tam",
        "tt_ru" => "tat",
        "tl_ph" => "tgl",
        "th_th" => "tha",
        "tlh_aa" => "tlh",
        "tok" => "tok",
        "tr_tr" => "tur",
        "uk_ua" => "ukr",
        "vec_it" => "vec",
        "vi_vn" => "vie",
        "fra_de" => "vmf",
        "yi_de" => "yid",
        "yo_ng" => "yor",
        "zh_cn" | "zh_hk" | "zh_tw" => "zho",
        "ms_my" | "zlm_arab" => "zlm",
        _ => return None,
    };
    Some(code)
}
