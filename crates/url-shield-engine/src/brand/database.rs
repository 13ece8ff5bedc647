//! Brand database
//!
//! The canonical impersonation table: for each protected brand, its
//! official domains plus the typosquat, homograph and combosquat patterns
//! observed in phishing campaigns. Homograph entries contain literal
//! Cyrillic/Greek code points and are matched as raw byte sequences;
//! applying Unicode normalization anywhere in the pipeline would erase
//! exactly the signal they carry.

use serde::{Deserialize, Serialize};

/// Sector a brand belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BrandCategory {
    Financial,
    Technology,
    Social,
    Ecommerce,
    Entertainment,
    Logistics,
    Government,
}

impl BrandCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Financial => "FINANCIAL",
            Self::Technology => "TECHNOLOGY",
            Self::Social => "SOCIAL",
            Self::Ecommerce => "ECOMMERCE",
            Self::Entertainment => "ENTERTAINMENT",
            Self::Logistics => "LOGISTICS",
            Self::Government => "GOVERNMENT",
        }
    }
}

/// One protected brand
#[derive(Debug, Clone, Copy)]
pub struct Brand {
    /// Canonical lowercase name, used for containment and fuzzy matching
    pub name: &'static str,
    /// Domains that must never be flagged (suffix match on the host)
    pub official_domains: &'static [&'static str],
    pub typosquats: &'static [&'static str],
    /// Cyrillic/Greek lookalike spellings, matched byte-for-byte
    pub homographs: &'static [&'static str],
    pub combosquats: &'static [&'static str],
    pub category: BrandCategory,
}

/// The bundled brand table. Process-wide immutable data.
pub static BRANDS: &[Brand] = &[
    Brand {
        name: "paypal",
        official_domains: &["paypal.com", "paypal.me"],
        typosquats: &["paypa1", "paypall", "paipal", "payp4l", "pyapal"],
        homographs: &["pаypal", "paypаl", "рaypal"],
        combosquats: &["paypal-secure", "paypal-login", "paypal-verify", "securepaypal"],
        category: BrandCategory::Financial,
    },
    Brand {
        name: "stripe",
        official_domains: &["stripe.com"],
        typosquats: &["str1pe", "stripee", "srtipe"],
        homographs: &["strіpe", "stripе"],
        combosquats: &["stripe-payments", "stripe-verify"],
        category: BrandCategory::Financial,
    },
    Brand {
        name: "commbank",
        official_domains: &["commbank.com.au", "netbank.com.au"],
        typosquats: &["combank", "commbankk", "cornmbank"],
        homographs: &["соmmbank", "commbаnk"],
        combosquats: &["commbank-login", "commbank-netbank", "netbank-secure"],
        category: BrandCategory::Financial,
    },
    Brand {
        name: "nab",
        official_domains: &["nab.com.au"],
        typosquats: &["nabb", "naab"],
        homographs: &["nаb"],
        combosquats: &["nab-login", "nab-internet-banking", "nab-verify"],
        category: BrandCategory::Financial,
    },
    Brand {
        name: "westpac",
        official_domains: &["westpac.com.au"],
        typosquats: &["westpak", "wetspac", "westpacc"],
        homographs: &["wеstpac", "westpас"],
        combosquats: &["westpac-online", "westpac-login", "westpac-secure"],
        category: BrandCategory::Financial,
    },
    Brand {
        name: "anz",
        official_domains: &["anz.com", "anz.com.au"],
        typosquats: &["annz"],
        homographs: &["аnz"],
        combosquats: &["anz-internet-banking", "anz-login", "anz-secure"],
        category: BrandCategory::Financial,
    },
    Brand {
        name: "bendigo",
        official_domains: &["bendigobank.com.au"],
        typosquats: &["bendig0", "bendigoo"],
        homographs: &["bеndigo"],
        combosquats: &["bendigo-bank", "bendigo-login"],
        category: BrandCategory::Financial,
    },
    Brand {
        name: "google",
        official_domains: &["google.com", "google.com.au", "google.co.uk", "gmail.com"],
        typosquats: &["g00gle", "googel", "gogle", "goggle"],
        homographs: &["gооgle", "gоogle", "goоgle"],
        combosquats: &["google-verify", "google-security", "google-account"],
        category: BrandCategory::Technology,
    },
    Brand {
        name: "microsoft",
        official_domains: &["microsoft.com", "live.com", "office.com", "outlook.com"],
        typosquats: &["micr0soft", "mircosoft", "microsofft", "rnicrosoft"],
        homographs: &["miсrosoft", "microsоft"],
        combosquats: &["microsoft-support", "microsoft-login", "microsoft-security"],
        category: BrandCategory::Technology,
    },
    Brand {
        name: "apple",
        official_domains: &["apple.com", "icloud.com"],
        typosquats: &["app1e", "appel", "aplle"],
        homographs: &["аpple", "applе"],
        combosquats: &["apple-id", "apple-support", "apple-verify", "icloud-verify"],
        category: BrandCategory::Technology,
    },
    Brand {
        name: "amazon",
        official_domains: &["amazon.com", "amazon.com.au", "amazon.co.uk"],
        typosquats: &["amaz0n", "amzon", "amazonn", "arnazon"],
        homographs: &["аmazon", "amаzon"],
        combosquats: &["amazon-prime", "amazon-security", "amazon-verify"],
        category: BrandCategory::Ecommerce,
    },
    Brand {
        name: "facebook",
        official_domains: &["facebook.com", "fb.com"],
        typosquats: &["faceb00k", "facebok", "fakebook"],
        homographs: &["fаcebook", "facebооk"],
        combosquats: &["facebook-security", "facebook-login", "facebook-verify"],
        category: BrandCategory::Social,
    },
    Brand {
        name: "instagram",
        official_domains: &["instagram.com"],
        typosquats: &["instagrarn", "lnstagram", "imstagram"],
        homographs: &["іnstagram", "instаgram"],
        combosquats: &["instagram-verify", "instagram-support"],
        category: BrandCategory::Social,
    },
    Brand {
        name: "twitter",
        official_domains: &["twitter.com", "x.com"],
        typosquats: &["tw1tter", "twiter", "twtter"],
        homographs: &["twіtter", "twittеr"],
        combosquats: &["twitter-verify", "twitter-support"],
        category: BrandCategory::Social,
    },
    Brand {
        name: "linkedin",
        official_domains: &["linkedin.com"],
        typosquats: &["l1nkedin", "linkdin", "linkedln"],
        homographs: &["linkedіn", "lіnkedin"],
        combosquats: &["linkedin-jobs", "linkedin-verify"],
        category: BrandCategory::Social,
    },
    Brand {
        name: "tiktok",
        official_domains: &["tiktok.com"],
        typosquats: &["t1ktok", "tikt0k", "tlktok"],
        homographs: &["tіktok"],
        combosquats: &["tiktok-verify", "tiktok-rewards"],
        category: BrandCategory::Social,
    },
    Brand {
        name: "netflix",
        official_domains: &["netflix.com"],
        typosquats: &["netfl1x", "netflixx", "netfliks"],
        homographs: &["nеtflix", "netflіx"],
        combosquats: &["netflix-billing", "netflix-renew", "netflix-account"],
        category: BrandCategory::Entertainment,
    },
    Brand {
        name: "spotify",
        official_domains: &["spotify.com"],
        typosquats: &["sp0tify", "spotfy", "spotifyy"],
        homographs: &["spоtify", "sроtify"],
        combosquats: &["spotify-premium", "spotify-billing"],
        category: BrandCategory::Entertainment,
    },
    Brand {
        name: "auspost",
        official_domains: &["auspost.com.au"],
        typosquats: &["ausp0st", "auspots", "austpost"],
        homographs: &["аuspost", "ausроst"],
        combosquats: &["auspost-delivery", "auspost-parcel", "auspost-redelivery"],
        category: BrandCategory::Logistics,
    },
    Brand {
        name: "dhl",
        official_domains: &["dhl.com", "dhl.de"],
        typosquats: &["dh1"],
        homographs: &["dhł"],
        combosquats: &["dhl-tracking", "dhl-delivery", "dhl-parcel"],
        category: BrandCategory::Logistics,
    },
    Brand {
        name: "fedex",
        official_domains: &["fedex.com"],
        typosquats: &["fedexx", "fed3x", "fedeks"],
        homographs: &["fеdex", "fedеx"],
        combosquats: &["fedex-tracking", "fedex-delivery"],
        category: BrandCategory::Logistics,
    },
    Brand {
        name: "mygov",
        official_domains: &["my.gov.au"],
        typosquats: &["myg0v", "mygovv"],
        homographs: &["mуgov", "mygоv"],
        combosquats: &["mygov-login", "mygov-refund", "mygov-verify"],
        category: BrandCategory::Government,
    },
    Brand {
        name: "ato",
        official_domains: &["ato.gov.au"],
        typosquats: &["at0"],
        homographs: &["аto"],
        combosquats: &["ato-refund", "ato-tax-return", "ato-payment"],
        category: BrandCategory::Government,
    },
    Brand {
        name: "medicare",
        official_domains: &["servicesaustralia.gov.au", "medicare.gov"],
        typosquats: &["med1care", "medicar3"],
        homographs: &["mеdicare", "medicаre"],
        combosquats: &["medicare-rebate", "medicare-claim"],
        category: BrandCategory::Government,
    },
    Brand {
        name: "coinbase",
        official_domains: &["coinbase.com"],
        typosquats: &["c0inbase", "coinbse", "coinbasse"],
        homographs: &["соinbase", "coinbаse"],
        combosquats: &["coinbase-wallet", "coinbase-verify", "coinbase-login"],
        category: BrandCategory::Financial,
    },
    Brand {
        name: "binance",
        official_domains: &["binance.com"],
        typosquats: &["b1nance", "binanse", "biinance"],
        homographs: &["bіnance", "binаnce"],
        combosquats: &["binance-wallet", "binance-verify"],
        category: BrandCategory::Financial,
    },
    Brand {
        name: "metamask",
        official_domains: &["metamask.io"],
        typosquats: &["metarnask", "rnetamask", "metamsk"],
        homographs: &["metаmask", "mеtamask"],
        combosquats: &["metamask-wallet", "metamask-restore", "metamask-verify"],
        category: BrandCategory::Financial,
    },
    Brand {
        name: "hsbc",
        official_domains: &["hsbc.com", "hsbc.co.uk"],
        typosquats: &["hsbcc", "hzbc"],
        homographs: &["hsbс"],
        combosquats: &["hsbc-online", "hsbc-secure", "hsbc-login"],
        category: BrandCategory::Financial,
    },
    Brand {
        name: "barclays",
        official_domains: &["barclays.co.uk", "barclays.com"],
        typosquats: &["barc1ays", "barclys", "barcalys"],
        homographs: &["bаrclays", "barclаys"],
        combosquats: &["barclays-online", "barclays-secure"],
        category: BrandCategory::Financial,
    },
    Brand {
        name: "revolut",
        official_domains: &["revolut.com"],
        typosquats: &["rev0lut", "revoult", "revoluut"],
        homographs: &["rеvolut", "revоlut"],
        combosquats: &["revolut-verify", "revolut-support"],
        category: BrandCategory::Financial,
    },
    Brand {
        name: "alipay",
        official_domains: &["alipay.com"],
        typosquats: &["a1ipay", "allipay", "alipey"],
        homographs: &["аlipay", "aliрay"],
        combosquats: &["alipay-wallet", "alipay-verify"],
        category: BrandCategory::Financial,
    },
    Brand {
        name: "wechat",
        official_domains: &["wechat.com", "weixin.qq.com"],
        typosquats: &["wechatt", "wech4t", "vvechat"],
        homographs: &["wесhat", "wechаt"],
        combosquats: &["wechat-pay", "wechat-verify"],
        category: BrandCategory::Social,
    },
    Brand {
        name: "whatsapp",
        official_domains: &["whatsapp.com", "whatsapp.net"],
        typosquats: &["whatsap", "whatssapp", "wh4tsapp"],
        homographs: &["whаtsapp", "whatsаpp"],
        combosquats: &["whatsapp-verify", "whatsapp-web", "whatsapp-backup"],
        category: BrandCategory::Social,
    },
    Brand {
        name: "telegram",
        official_domains: &["telegram.org", "t.me"],
        typosquats: &["te1egram", "telegramm", "telegrarn"],
        homographs: &["tеlegram", "telеgram"],
        combosquats: &["telegram-premium", "telegram-verify"],
        category: BrandCategory::Social,
    },
    Brand {
        name: "ebay",
        official_domains: &["ebay.com", "ebay.com.au", "ebay.co.uk"],
        typosquats: &["eb4y", "ebayy", "ebaay"],
        homographs: &["еbay", "ebаy"],
        combosquats: &["ebay-seller", "ebay-refund", "ebay-verify"],
        category: BrandCategory::Ecommerce,
    },
    Brand {
        name: "shopify",
        official_domains: &["shopify.com", "myshopify.com"],
        typosquats: &["sh0pify", "shoppify", "shopifyy"],
        homographs: &["shоpify", "shopіfy"],
        combosquats: &["shopify-store", "shopify-billing"],
        category: BrandCategory::Ecommerce,
    },
    Brand {
        name: "dropbox",
        official_domains: &["dropbox.com"],
        typosquats: &["dr0pbox", "dropb0x", "droppbox"],
        homographs: &["drорbox", "dropbоx"],
        combosquats: &["dropbox-share", "dropbox-verify"],
        category: BrandCategory::Technology,
    },
    Brand {
        name: "zoom",
        official_domains: &["zoom.us", "zoom.com"],
        typosquats: &["z00m", "zoorn"],
        homographs: &["zооm"],
        combosquats: &["zoom-meeting", "zoom-join", "zoom-update"],
        category: BrandCategory::Technology,
    },
    Brand {
        name: "slack",
        official_domains: &["slack.com"],
        typosquats: &["s1ack", "slackk"],
        homographs: &["slаck", "slасk"],
        combosquats: &["slack-workspace", "slack-invite"],
        category: BrandCategory::Technology,
    },
    Brand {
        name: "steam",
        official_domains: &["steampowered.com", "steamcommunity.com"],
        typosquats: &["stearn", "st3am", "steaam"],
        homographs: &["stеam", "steаm"],
        combosquats: &["steam-gift", "steam-trade", "steam-wallet"],
        category: BrandCategory::Entertainment,
    },
    Brand {
        name: "discord",
        official_domains: &["discord.com", "discord.gg"],
        typosquats: &["d1scord", "disc0rd", "dlscord"],
        homographs: &["dіscord", "discоrd"],
        combosquats: &["discord-nitro", "discord-gift"],
        category: BrandCategory::Social,
    },
];
