use std::rc::Rc;

use crowdfunding::Translator;
use dioxus::prelude::*;

pub fn use_translator() -> Rc<Translator> {
    use_context::<Rc<Translator>>()
}
