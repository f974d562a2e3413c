//! Canned answers served when the language model is unavailable.
//!
//! Topics are matched by lowercase substring against the question, in table order, so more
//! specific topics come first.

/// A prepared answer for a recognized topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CannedAnswer {
	pub topic: &'static str,
	pub answer: &'static str,
}

struct Topic {
	name: &'static str,
	patterns: &'static [&'static str],
	answer: &'static str,
}

pub const GENERAL_TOPIC: &str = "general";

const TOPICS: &[Topic] = &[
	Topic {
		name: "risk_assessment",
		patterns: &["procena rizika", "procenu rizika", "akt o proceni", "rizik"],
		answer: "Akt o proceni rizika je obavezan dokument za svakog poslodavca. Njime se za svako \
		         radno mesto utvrđuju opasnosti i štetnosti, procenjuju rizici i propisuju mere za \
		         njihovo otklanjanje ili smanjenje. Akt se menja kada se promene tehnološki \
		         postupak, sredstva za rad ili organizacija rada, kao i posle teže povrede na radu.",
	},
	Topic {
		name: "training",
		patterns: &["osposobljavanj", "obuk", "obuč"],
		answer: "Poslodavac je dužan da zaposlenog osposobi za bezbedan i zdrav rad pri zasnivanju \
		         radnog odnosa, pri premeštaju na drugo radno mesto, pri uvođenju nove tehnologije i \
		         pri promeni procesa rada. Osposobljavanje se obavlja u toku radnog vremena, o \
		         trošku poslodavca, i evidentira se u propisanim obrascima.",
	},
	Topic {
		name: "medical_examinations",
		patterns: &["lekarsk", "pregled", "zdravstven"],
		answer: "Zaposleni na radnim mestima sa povećanim rizikom moraju proći prethodni lekarski \
		         pregled pre početka rada i periodične preglede u rokovima utvrđenim aktom o proceni \
		         rizika. Preglede obavlja služba medicine rada, a troškove snosi poslodavac.",
	},
	Topic {
		name: "personal_protective_equipment",
		patterns: &["lzo", "zaštitn", "oprem"],
		answer: "Lična zaštitna oprema se koristi kada se rizik ne može otkloniti drugim merama. \
		         Poslodavac je dužan da je obezbedi bez naknade, da održava njenu ispravnost i da \
		         zaposlene osposobi za njeno pravilno korišćenje. Zaposleni je dužan da je namenski \
		         koristi.",
	},
	Topic {
		name: "workplace_injury",
		patterns: &["povred", "nezgod", "nesreć"],
		answer: "Povredu na radu poslodavac prijavljuje inspekciji rada i nadležnom organu \
		         unutrašnjih poslova odmah, a najkasnije u roku od 24 časa kada je povreda smrtna, \
		         kolektivna ili teška. Izveštaj o povredi na radu izdaje se u propisanom roku, a \
		         sve povrede se vode u evidenciji poslodavca.",
	},
	Topic {
		name: "fire_protection",
		patterns: &["požar", "pozar", "zop", "ppz", "aparat"],
		answer: "Zaštita od požara obuhvata osnovnu obuku zaposlenih, ispravne i redovno \
		         servisirane aparate za gašenje požara, obeležene evakuacione puteve i plan \
		         evakuacije. Pravila zaštite od požara donosi poslodavac u skladu sa kategorijom \
		         ugroženosti objekta.",
	},
	Topic {
		name: "safety_officer",
		patterns: &["lice za bezbednost", "stručno lice", "licenc", "strucno lice"],
		answer: "Poslodavac određuje lice za bezbednost i zdravlje na radu koje ima položen stručni \
		         ispit. Poslove može obavljati zaposleni kod poslodavca ili pravno lice, odnosno \
		         preduzetnik sa licencom za obavljanje poslova bezbednosti i zdravlja na radu.",
	},
];

const GENERAL_ANSWER: &str = "Trenutno ne mogu da pripremim detaljan odgovor. Za pitanja iz \
                              oblasti bezbednosti i zdravlja na radu obratite se licu za \
                              bezbednost i zdravlje na radu kod poslodavca ili pogledajte \
                              objavljene članke na portalu.";

pub fn canned_answer(question: &str) -> CannedAnswer {
	let lowered = question.to_lowercase();

	for topic in TOPICS {
		if topic.patterns.iter().any(|pattern| lowered.contains(pattern)) {
			return CannedAnswer { topic: topic.name, answer: topic.answer };
		}
	}

	CannedAnswer { topic: GENERAL_TOPIC, answer: GENERAL_ANSWER }
}
