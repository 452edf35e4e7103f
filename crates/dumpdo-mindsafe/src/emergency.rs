//! Pre-authored emergency safety scripts.
//!
//! One script per risk type: empathetic opener, crisis-line contacts
//! (CVV 188, SAMU 192, CAPS) and an immediate grounding/safety action list
//! specific to the risk. These are content assets keyed by [`RiskType`];
//! the assessment algorithm never composes them.

use crate::types::RiskType;

const SUICIDAL_IDEATION: &str = "\
🚨 **Estou aqui com você.**

O que você está sentindo é real e muito difícil. Você não precisa passar por isso sozinho(a).

**Agora, por favor:**
1. 📞 **Ligue para o CVV: 188** (24h, gratuito, sigiloso)
2. Ou acesse **cvv.org.br** para chat
3. Se estiver em perigo imediato, ligue **192 (SAMU)**

Enquanto isso, vamos fazer algo juntos:
- Coloque os dois pés no chão
- Respire fundo: 4 segundos inspirando, 7 segurando, 8 soltando
- Olhe ao redor e me diga 3 coisas que você consegue ver

Estou aqui. Você não está sozinho(a).";

const SELF_HARM: &str = "\
🚨 **Ei, estou aqui.**

Você merece cuidado, não dor. O que você está sentindo é válido.

**Vamos fazer uma pausa juntos:**
1. Se tiver algo que possa te machucar por perto, pode se afastar dele?
2. Coloque as mãos em água fria ou segure um gelo - isso pode ajudar a aliviar a tensão
3. Respire comigo: inspira... segura... solta...

**Se precisar conversar agora:**
📞 **CVV: 188** (24h, gratuito, sigiloso)

Me conta: onde você está agora? Está em um lugar seguro?";

const VIOLENCE: &str = "\
🚨 **Vamos pausar um segundo.**

O que você está sentindo é intenso. Raiva assim queima por dentro.

**Antes de qualquer coisa:**
1. Se afaste da situação/pessoa, se possível
2. Faça 10 respirações profundas, bem lentas
3. Aperte forte uma almofada ou toalha

**Se você ou alguém está em perigo:**
📞 **190 (Polícia)** ou **192 (SAMU)**

**Para conversar:**
📞 **CVV: 188** (24h, gratuito)

Me conta: o que aconteceu pra você chegar nesse ponto?";

const SUBSTANCE_CRISIS: &str = "\
🚨 **Estou preocupado(a) com você.**

**Se você usou algo e está se sentindo mal:**
📞 **SAMU: 192** - agora mesmo

**Se está em crise de abstinência ou precisa de ajuda:**
1. Não fique sozinho(a)
2. Não misture substâncias
3. Beba água e sente ou deite em lugar seguro

**Para conversar:**
📞 **CVV: 188** (24h, gratuito)
📞 **CAPS AD** da sua cidade

Me conta: como você está fisicamente agora? Consegue descrever?";

const PANIC_ATTACK: &str = "\
🚨 **Ei, estou aqui. Isso vai passar.**

Eu sei que parece que não, mas vai. Vamos fazer isso juntos.

**Agora mesmo:**
1. **Pés no chão** - sinta o chão te segurando
2. **Respira comigo:**
   - Inspira contando 1... 2... 3... 4...
   - Segura 1... 2... 3... 4...
   - Solta 1... 2... 3... 4... 5... 6...
3. **5 coisas:** Me diz 5 coisas que você consegue ver ao seu redor

Você não está morrendo. É o seu corpo reagindo. E vai passar.

Continua respirando comigo. Estou aqui.";

const SEVERE_DISTRESS: &str = "\
🚨 **Eu te escuto. Está muito pesado.**

Você não precisa resolver nada agora. Só precisa passar esse momento.

**Vamos fazer uma coisa de cada vez:**
1. Onde você está? Sente em algum lugar.
2. Coloca a mão no peito. Sinta seu coração.
3. Respira fundo 3 vezes.

**Se precisar de alguém agora:**
📞 **CVV: 188** (24h, gratuito, sigiloso)

Você chegou até aqui. Isso já é muito.
Me conta mais sobre o que está acontecendo.";

/// Fixed risk-type → safety-script lookup.
pub fn emergency_response(risk_type: RiskType) -> &'static str {
    match risk_type {
        RiskType::SuicidalIdeation => SUICIDAL_IDEATION,
        RiskType::SelfHarm => SELF_HARM,
        RiskType::Violence => VIOLENCE,
        RiskType::SubstanceCrisis => SUBSTANCE_CRISIS,
        RiskType::PanicAttack => PANIC_ATTACK,
        RiskType::SevereDistress => SEVERE_DISTRESS,
    }
}
